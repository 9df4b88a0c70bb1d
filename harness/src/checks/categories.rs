use fees_client::{ApiRequest, Transport};

use super::ApiKey;
use crate::probe::fetch_json;
use crate::recorder::Recorder;
use crate::shape::{optional, Shape};

const CATEGORY: Shape = Shape::new(&[
    optional("id"),
    optional("display_name"),
    optional("fee_count"),
]);

/// `GET /categories`: a non-empty array whose entries carry counts.
pub async fn check_categories<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    key: &ApiKey,
) {
    let request = ApiRequest::get("/categories").query("api_key", key.value());
    let doc = match fetch_json(transport, &request).await {
        Ok(doc) => doc,
        Err(failure) => {
            recorder.fail("GET /categories - Basic request", failure.to_string());
            return;
        }
    };

    let categories = doc.as_array().map(Vec::as_slice).unwrap_or_default();
    match categories.first() {
        Some(first) => {
            let count = categories.len();
            CATEGORY
                .validate(first)
                .record(recorder, "GET /categories - Response structure", None);
            recorder.pass_with(
                "GET /categories - Basic request",
                format!("Returned {count} categories"),
            );
        }
        None => recorder.fail("GET /categories - Basic request", "Expected non-empty array"),
    }
}
