//! Response decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::transport::RawResponse;

/// The body could not be decoded into the expected document.
#[derive(Debug, Error)]
#[error("could not decode response body (status {status}): {source}")]
pub struct DecodeError {
    pub status: u16,
    #[source]
    pub source: serde_json::Error,
}

/// Parse a raw body into an untyped JSON document.
///
/// # Errors
/// Returns [`DecodeError`] if the body is not valid JSON.
pub fn decode_json(response: &RawResponse) -> Result<Value, DecodeError> {
    decode(response)
}

/// Parse a raw body into a typed value.
///
/// # Errors
/// Returns [`DecodeError`] if the body is not valid JSON or does not match `T`.
pub fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, DecodeError> {
    serde_json::from_str(&response.body).map_err(|source| DecodeError {
        status: response.status,
        source,
    })
}
