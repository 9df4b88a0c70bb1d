use fees_client::{ApiRequest, Transport};

use super::ApiKey;
use crate::config::ChecksConfig;
use crate::probe::{expect_status, fetch_json};
use crate::recorder::Recorder;
use crate::shape::{required, Shape};

const FEE: Shape = Shape::new(&[required("id"), required("name")]);

/// `GET /fees/{id}`: a known id, an unknown id and a missing key.
pub async fn check_fee_by_id<T: Transport + ?Sized>(
    transport: &T,
    recorder: &mut Recorder,
    key: &ApiKey,
    settings: &ChecksConfig,
) {
    let valid_name = format!("GET /fees/{{id}} - Valid ID ({})", settings.fee_id);
    let valid =
        ApiRequest::get(format!("/fees/{}", settings.fee_id)).query("api_key", key.value());
    match fetch_json(transport, &valid).await {
        Ok(doc) => {
            let name = doc["name"].as_str().unwrap_or("N/A");
            FEE.validate(&doc)
                .record(recorder, &valid_name, Some(format!("Fee: {name}")));
        }
        Err(failure) => recorder.fail(valid_name, failure.to_string()),
    }

    expect_status(
        transport,
        recorder,
        "GET /fees/{id} - Invalid ID (404)",
        &ApiRequest::get(format!("/fees/{}", settings.missing_fee_id))
            .query("api_key", key.value()),
        &[404],
    )
    .await;

    expect_status(
        transport,
        recorder,
        "GET /fees/{id} - Missing API key",
        &ApiRequest::get(format!("/fees/{}", settings.fee_id)),
        &[401],
    )
    .await;
}
