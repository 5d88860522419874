//! Request body writers
//!
//! Every mutating call serializes its typed request struct to JSON and hands the
//! bytes to a [`RequestWriter`] before they go over the wire. The writer may
//! rewrite the body or refuse it; a refusal aborts the call and nothing is sent.

use crate::error::NetBoxError;

/// Hook invoked on the serialized body of an outgoing POST/PATCH request.
pub trait RequestWriter: Send + Sync {
    /// Return the body to transmit.
    fn write(&self, body: Vec<u8>) -> Result<Vec<u8>, NetBoxError>;
}

/// Writer that sends the serialized body unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RequestWriter for PassThrough {
    fn write(&self, body: Vec<u8>) -> Result<Vec<u8>, NetBoxError> {
        Ok(body)
    }
}

impl<F> RequestWriter for F
where
    F: Fn(Vec<u8>) -> Result<Vec<u8>, NetBoxError> + Send + Sync,
{
    fn write(&self, body: Vec<u8>) -> Result<Vec<u8>, NetBoxError> {
        self(body)
    }
}
