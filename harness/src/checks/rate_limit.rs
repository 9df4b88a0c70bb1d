use super::ApiKey;
use crate::recorder::Recorder;

/// Requests per hour the API allows for one key.
const HOURLY_LIMIT: u32 = 100;

/// The limit cannot be exercised without exhausting the key, so this only
/// records that manual verification is needed.
pub fn check_rate_limiting(recorder: &mut Recorder, key: &ApiKey) {
    tracing::info!(
        key = %key,
        limit = HOURLY_LIMIT,
        "rate limit is {HOURLY_LIMIT} requests/hour per API key"
    );
    recorder.warn(
        "Rate Limiting - Manual verification needed",
        format!(
            "To fully test, make {} requests rapidly and verify the last one is blocked",
            HOURLY_LIMIT + 1
        ),
    );
}
