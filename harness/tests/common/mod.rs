//! A scripted fees API for exercising the checks without a network.

#![allow(dead_code)]

use fees_client::mock::MockTransport;
use fees_client::{ApiRequest, Method, RawResponse, TransportError};
use serde_json::{json, Value};

pub const ISSUED_KEY: &str = "nga_0123456789abcdef0123456789";

pub fn docs() -> Value {
    json!({
        "repository": "https://github.com/example/fees-api",
        "main_documentation": {
            "api_reference": "https://example.com/API_REFERENCE.md",
            "quick_start": "https://example.com/QUICK_START.md",
            "data_sources": "https://example.com/DATA_SOURCES.md",
            "readme": "https://example.com/README.md"
        },
        "code_examples": {
            "javascript": "https://example.com/javascript-example.js",
            "python": "https://example.com/python-example.py",
            "curl": "https://example.com/curl-examples.sh"
        },
        "raw_links": {}
    })
}

pub fn fee(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "National identity enrolment",
        "amount": 0.0,
        "currency": "NGN"
    })
}

pub fn fees_page(per_page: u64) -> Value {
    json!({
        "items": [fee(1, "NIN enrolment"), fee(2, "NIN modification")],
        "meta": {"page": 1, "perPage": per_page, "pageTotal": 1, "total": 2}
    })
}

pub fn metadata() -> Value {
    json!({
        "api_version": "1.0",
        "statistics": {
            "total_fees": 2,
            "total_categories": 1,
            "total_agencies": 1,
            "total_subcategories": 1,
            "total_sources": 1
        },
        "last_database_update": 1_700_000_000_000_i64,
        "generated_at": 1_700_000_000_000_i64,
        "documentation": {"api_reference": "https://example.com/API_REFERENCE.md"}
    })
}

fn unauthorized() -> RawResponse {
    RawResponse::json(
        401,
        &json!({"code": "ERROR_CODE_ACCESS_DENIED", "message": "Invalid API key"}),
    )
}

/// Answers every endpoint the way a healthy API would.
pub fn healthy(request: &ApiRequest) -> Result<RawResponse, TransportError> {
    if request.method == Method::Post {
        return Ok(match request.path.as_str() {
            "/api_key/generate" => RawResponse::json(
                200,
                &json!({"success": true, "api_key": ISSUED_KEY, "message": "Key generated"}),
            ),
            _ => RawResponse::new(404, "{}"),
        });
    }

    if request.path == "/docs" {
        return Ok(RawResponse::json(200, &docs()));
    }

    if request.query_value("api_key") != Some(ISSUED_KEY) {
        return Ok(unauthorized());
    }

    let response = match request.path.as_str() {
        "/fees" => {
            let per_page = request
                .query_value("per_page")
                .and_then(|v| v.parse().ok())
                .unwrap_or(20);
            RawResponse::json(200, &fees_page(per_page))
        }
        "/fees/1" => RawResponse::json(200, &fee(1, "NIN enrolment")),
        "/fees/search" => match request.query_value("q") {
            Some(_) => RawResponse::json(200, &json!([fee(1, "NIN enrolment")])),
            None => RawResponse::json(
                400,
                &json!({"code": "ERROR_CODE_INPUT_ERROR", "message": "Missing param: q"}),
            ),
        },
        "/categories" => RawResponse::json(
            200,
            &json!([{"id": 1, "display_name": "Identity", "fee_count": 2}]),
        ),
        "/metadata" => RawResponse::json(200, &metadata()),
        _ => RawResponse::json(
            404,
            &json!({"code": "ERROR_CODE_NOT_FOUND", "message": "Not found"}),
        ),
    };
    Ok(response)
}

pub fn healthy_api() -> MockTransport {
    MockTransport::new(healthy)
}

/// The healthy API with one path answered by `override_with` instead.
pub fn api_with<F>(path: &'static str, override_with: F) -> MockTransport
where
    F: Fn(&ApiRequest) -> Result<RawResponse, TransportError> + Send + Sync + 'static,
{
    MockTransport::new(move |request| {
        if request.path == path {
            override_with(request)
        } else {
            healthy(request)
        }
    })
}
