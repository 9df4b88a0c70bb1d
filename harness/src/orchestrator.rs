//! Fixed-order driver for one smoke-test run.

use fees_client::Transport;

use crate::checks::{
    check_categories, check_docs, check_fee_by_id, check_fees, check_generate_api_key,
    check_metadata, check_rate_limiting, check_search,
};
use crate::config::ChecksConfig;
use crate::recorder::Recorder;

/// Verdict recorded in place of every key-dependent check when no key was issued.
pub const SKIPPED_CHECKS: &str = "Authenticated checks - Skipped";

/// Run every check in order and return the populated recorder.
///
/// Docs first, then key generation. When no key could be obtained the
/// remaining checks are replaced by a single WARN and no further requests
/// are sent.
pub async fn run<T: Transport + ?Sized>(transport: &T, settings: &ChecksConfig) -> Recorder {
    let mut recorder = Recorder::new();
    tracing::info!("starting fees API smoke test");

    check_docs(transport, &mut recorder).await;

    let key =
        check_generate_api_key(transport, &mut recorder, settings.user_email.as_deref()).await;
    let Some(key) = key else {
        recorder.warn(SKIPPED_CHECKS, "No API key available");
        return recorder;
    };
    tracing::debug!(key = %key, obtained_at = %key.obtained_at(), "using generated API key");

    check_fees(transport, &mut recorder, &key, settings).await;
    check_fee_by_id(transport, &mut recorder, &key, settings).await;
    check_search(transport, &mut recorder, &key, &settings.search_term).await;
    check_categories(transport, &mut recorder, &key).await;
    check_metadata(transport, &mut recorder, &key).await;
    check_rate_limiting(&mut recorder, &key);

    let summary = recorder.summary();
    tracing::info!(
        total = summary.total,
        passed = summary.passed.len(),
        failed = summary.failed.len(),
        warnings = summary.warnings.len(),
        "smoke test finished"
    );
    recorder
}
