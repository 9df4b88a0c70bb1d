use fees_client::{ApiRequest, Transport};

use super::ApiKey;
use crate::config::ChecksConfig;
use crate::probe::{array_len, expect_status, fetch_json};
use crate::recorder::Recorder;
use crate::shape::{required, Shape};

const FEES_PAGE: Shape = Shape::new(&[required("items"), required("meta")]);

/// Page size requested by the pagination probe.
const PAGINATION_PAGE_SIZE: u64 = 10;

/// `GET /fees`: listing, filters, pagination and key enforcement.
pub async fn check_fees<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    key: &ApiKey,
    settings: &ChecksConfig,
) {
    let listing = || ApiRequest::get("/fees").query("api_key", key.value());

    let basic = listing()
        .query("page", 1)
        .query("per_page", settings.page_size);
    match fetch_json(transport, &basic).await {
        Ok(doc) => FEES_PAGE.validate(&doc).record(
            recorder,
            "GET /fees - Basic request",
            Some(format!("Returned {} items", array_len(&doc["items"]))),
        ),
        Err(failure) => recorder.fail("GET /fees - Basic request", failure.to_string()),
    }

    let filters = [
        (
            "GET /fees - Category filter",
            listing().query("category", &settings.category),
        ),
        (
            "GET /fees - Search filter",
            listing().query("search", &settings.search_term),
        ),
    ];
    for (name, request) in filters {
        let request = request.query("per_page", settings.page_size);
        match fetch_json(transport, &request).await {
            Ok(doc) => recorder.pass_with(
                name,
                format!("Returned {} items", array_len(&doc["items"])),
            ),
            Err(failure) => recorder.fail(name, failure.to_string()),
        }
    }

    let paged = listing()
        .query("page", 1)
        .query("per_page", PAGINATION_PAGE_SIZE);
    match fetch_json(transport, &paged).await {
        Ok(doc) if doc["meta"]["perPage"].as_u64() == Some(PAGINATION_PAGE_SIZE) => {
            recorder.pass("GET /fees - Pagination");
        }
        Ok(_) => recorder.warn(
            "GET /fees - Pagination",
            "Pagination not working as expected",
        ),
        Err(failure) => recorder.fail("GET /fees - Pagination", failure.to_string()),
    }

    expect_status(
        transport,
        recorder,
        "GET /fees - Missing API key (error handling)",
        &ApiRequest::get("/fees").query("page", 1),
        &[401],
    )
    .await;

    expect_status(
        transport,
        recorder,
        "GET /fees - Invalid API key (error handling)",
        &ApiRequest::get("/fees").query("api_key", &settings.invalid_api_key),
        &[401],
    )
    .await;
}
