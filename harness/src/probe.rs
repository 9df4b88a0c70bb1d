//! Request helpers shared by the endpoint checks.
//!
//! Positive probes either yield a decoded document or a [`CheckFailure`];
//! negative probes compare the observed status against the expected ones.

use fees_client::decode::{self, DecodeError};
use fees_client::{ApiRequest, Transport, TransportError};
use serde_json::Value;
use thiserror::Error;

use crate::recorder::Recorder;

/// Longest body excerpt carried in an unexpected-status message.
const BODY_EXCERPT_CHARS: usize = 120;

/// Why a positive probe produced no document.
#[derive(Debug, Error)]
pub enum CheckFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("HTTP {status}: {excerpt}")]
    UnexpectedStatus { status: u16, excerpt: String },
}

/// Send `request` and decode a 2xx body.
///
/// # Errors
/// Returns a [`CheckFailure`] on transport errors, non-2xx statuses and
/// undecodable bodies.
pub async fn fetch_json<T>(transport: &T, request: &ApiRequest) -> Result<Value, CheckFailure>
where
    T: Transport + ?Sized,
{
    let response = transport.send(request).await?;

    if !response.is_success() {
        return Err(CheckFailure::UnexpectedStatus {
            status: response.status,
            excerpt: response.body.chars().take(BODY_EXCERPT_CHARS).collect(),
        });
    }

    Ok(decode::decode_json(&response)?)
}

/// Send a request the API is expected to reject and record the outcome.
///
/// PASS when the status is one of `expected`, WARN when it differs (the
/// exact status code is advisory), FAIL when no response was received.
pub async fn expect_status<T>(
    transport: &T,
    recorder: &mut Recorder,
    name: &str,
    request: &ApiRequest,
    expected: &[u16],
) where
    T: Transport + ?Sized,
{
    match transport.send(request).await {
        Ok(response) if expected.contains(&response.status) => recorder.pass(name),
        Ok(response) => {
            let expected = expected
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join("/");
            recorder.warn(
                name,
                format!("Expected {expected}, got {}", response.status),
            );
        }
        Err(err) => recorder.fail(name, err.to_string()),
    }
}

/// Length of a JSON array, or 0 for anything else.
#[must_use]
pub fn array_len(value: &Value) -> usize {
    value.as_array().map_or(0, Vec::len)
}
