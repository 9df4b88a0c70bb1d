use fees_client::{normalize_search_query, ApiRequest, Transport, MIN_SEARCH_LEN};

use super::ApiKey;
use crate::probe::{array_len, expect_status, fetch_json};
use crate::recorder::Recorder;

/// A query one character short of [`MIN_SEARCH_LEN`], rejected locally on every run.
pub const SHORT_QUERY: &str = "a";

/// `GET /fees/search`: a real term, a too-short term, then a request without `q`.
pub async fn check_search<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    key: &ApiKey,
    term: &str,
) {
    check_search_term(transport, recorder, key, term).await;
    check_search_term(transport, recorder, key, SHORT_QUERY).await;
    check_search_missing_query(transport, recorder, key).await;
}

/// Search for `term`. Terms shorter than [`MIN_SEARCH_LEN`] after trimming
/// are rejected locally and never sent.
pub async fn check_search_term<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    key: &ApiKey,
    term: &str,
) {
    let Some(q) = normalize_search_query(term) else {
        recorder.warn(
            "GET /fees/search - Query too short",
            format!(
                "Query {term:?} is shorter than {MIN_SEARCH_LEN} characters; request not sent"
            ),
        );
        return;
    };

    let name = format!("GET /fees/search - Valid search ({q})");
    let request = ApiRequest::get("/fees/search")
        .query("q", q)
        .query("api_key", key.value());

    match fetch_json(transport, &request).await {
        Ok(doc) if doc.is_array() => {
            recorder.pass_with(name, format!("Found {} results", array_len(&doc)));
        }
        Ok(_) => recorder.fail(name, "Expected array response"),
        Err(failure) => recorder.fail(name, failure.to_string()),
    }
}

/// The API is expected to reject a search without `q` with 400 or 422.
pub async fn check_search_missing_query<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    key: &ApiKey,
) {
    expect_status(
        transport,
        recorder,
        "GET /fees/search - Missing query",
        &ApiRequest::get("/fees/search").query("api_key", key.value()),
        &[400, 422],
    )
    .await;
}
