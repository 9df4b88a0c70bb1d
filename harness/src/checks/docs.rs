use fees_client::{ApiRequest, Transport};

use crate::probe::fetch_json;
use crate::recorder::Recorder;
use crate::shape::{optional, required, Shape};

const DOCS: Shape = Shape::new(&[
    required("repository"),
    required("main_documentation"),
    required("code_examples"),
    required("raw_links"),
]);

const MAIN_DOCUMENTATION: Shape = Shape::new(&[
    optional("api_reference"),
    optional("quick_start"),
    optional("data_sources"),
    optional("readme"),
]);

const CODE_EXAMPLES: Shape = Shape::new(&[
    optional("javascript"),
    optional("python"),
    optional("curl"),
]);

/// `GET /docs`, the only endpoint that needs no key.
pub async fn check_docs<T: Transport + ?Sized>(transport: &T, recorder: &mut Recorder) {
    let doc = match fetch_json(transport, &ApiRequest::get("/docs")).await {
        Ok(doc) => doc,
        Err(failure) => {
            recorder.fail("GET /docs - Basic request", failure.to_string());
            return;
        }
    };

    DOCS.validate(&doc)
        .record(recorder, "GET /docs - Response structure", None);

    if let Some(links) = doc.get("main_documentation") {
        MAIN_DOCUMENTATION
            .validate(links)
            .record(recorder, "GET /docs - Main documentation links", None);
    }

    if let Some(examples) = doc.get("code_examples") {
        CODE_EXAMPLES
            .validate(examples)
            .record(recorder, "GET /docs - Code example links", None);
    }
}
