//! NetBox API models
//!
//! These models match the NetBox REST API serializers. Read models mirror what
//! NetBox returns; `Writable*` models mirror what the client serializes for
//! create and partial-update requests.
//!
//! Writable models deliberately keep the serialization rules of a generated
//! client: `created`/`last_updated` are always emitted (the zero value becomes
//! [`ZERO_TIMESTAMP`]), empty strings and `false` booleans are omitted, unset
//! relations are omitted and tags are emitted whenever they are set, even to an
//! empty list. Callers that need a field cleared rather than omitted shape the
//! body through a [`RequestWriter`](crate::RequestWriter).

mod common;
mod dcim;
mod extras;
mod tenancy;
mod virtualization;

pub use common::*;
pub use dcim::*;
pub use extras::*;
pub use tenancy::*;
pub use virtualization::*;
