//! NetBox REST API Client
//!
//! A Rust client library for interacting with the NetBox REST API, shaped for
//! use by the NetBox Terraform provider.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{NetBoxClient, PassThrough, WritableSite, SITES};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Create a site
//! let body = WritableSite {
//!     name: "FRA1".to_string(),
//!     slug: "fra1".to_string(),
//!     ..Default::default()
//! };
//! let site = SITES.create(&client, &body, &PassThrough).await?;
//!
//! // Look it up again by slug
//! let found = SITES.list(&client, &[("slug", "fra1")]).await?;
//! assert_eq!(found[0].id, site.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Typed endpoints**: `create`, `retrieve`, `partial_update`, `delete` and `list` per object kind
//! - **Request writers**: serialized bodies pass through a [`RequestWriter`] before they are sent
//! - **Pagination**: list calls follow `next` links until every page is fetched
//! - **Mocking**: `MockNetBoxClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod endpoint;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
pub mod writer;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::{ClientOptions, NetBoxClient, DEFAULT_BASE_PATH};
pub use common::{HttpClient, PaginatedResponse};
pub use endpoint::*;
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxClientTrait;
pub use writer::{PassThrough, RequestWriter};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockNetBoxClient, RecordedRequest};
