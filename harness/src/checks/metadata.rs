use fees_client::{ApiRequest, Transport};

use super::ApiKey;
use crate::probe::fetch_json;
use crate::recorder::Recorder;
use crate::shape::{optional, required, Shape};

const METADATA: Shape = Shape::new(&[
    required("api_version"),
    required("statistics"),
    required("last_database_update"),
    required("generated_at"),
]);

const STATISTICS: Shape = Shape::new(&[
    optional("total_fees"),
    optional("total_categories"),
    optional("total_agencies"),
    optional("total_subcategories"),
    optional("total_sources"),
]);

const DOCUMENTATION: Shape = Shape::new(&[optional("documentation")]);

/// `GET /metadata`: version, statistics and documentation links.
pub async fn check_metadata<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    key: &ApiKey,
) {
    let request = ApiRequest::get("/metadata").query("api_key", key.value());
    let doc = match fetch_json(transport, &request).await {
        Ok(doc) => doc,
        Err(failure) => {
            recorder.fail("GET /metadata - Basic request", failure.to_string());
            return;
        }
    };

    METADATA
        .validate(&doc)
        .record(recorder, "GET /metadata - Response structure", None);

    if let Some(statistics) = doc.get("statistics") {
        STATISTICS
            .validate(statistics)
            .record(recorder, "GET /metadata - Statistics structure", None);
    }

    DOCUMENTATION
        .validate(&doc)
        .record(recorder, "GET /metadata - Documentation links", None);

    let version = doc["api_version"].as_str().unwrap_or("N/A");
    recorder.pass_with(
        "GET /metadata - Basic request",
        format!("API Version: {version}"),
    );
}
