//! Client for the government fees lookup API.
//!
//! Provides the HTTP seam the smoke-test harness talks through, plus typed
//! wrappers for every public endpoint.
//!
//! # Architecture
//!
//! The crate uses a trait-based design for testability:
//!
//! - [`Transport`] - Trait issuing one request and returning status + raw body
//! - [`HttpTransport`] - Real HTTP implementation using reqwest
//! - [`mock::MockTransport`] - Scripted transport for unit tests (behind `test-utils` feature)
//! - [`FeesClient`] - Typed operations (fees, search, categories, metadata, docs, keys)
//! - [`decode`] - Turns raw bodies into JSON documents or typed values
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Transport)
//!
//! ```ignore
//! use fees_client::mock::MockTransport;
//! use fees_client::{FeesClient, RawResponse};
//!
//! let transport = MockTransport::new(|_request| Ok(RawResponse::json(200, &json!([]))));
//! let client = FeesClient::new(transport).with_api_key("nga_test");
//! let categories = client.categories().await?;
//! assert!(categories.is_empty());
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! Use `wiremock` to test [`HttpTransport`] against stubbed HTTP:
//!
//! ```ignore
//! let server = MockServer::start().await;
//! Mock::given(method("GET"))
//!     .and(path("/categories"))
//!     .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
//!     .mount(&server)
//!     .await;
//!
//! let client = FeesClient::new(HttpTransport::new(server.uri())).with_api_key("nga_test");
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod client;
pub mod decode;
mod transport;
mod types;

pub use client::{normalize_search_query, FeesApiError, FeesClient, MIN_SEARCH_LEN};
pub use decode::DecodeError;
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport, TransportError};
pub use types::{
    ApiKeyGrant, Category, CategoryFees, CodeExamples, DocsLinks, Fee, FeeQuery, FeeSource,
    FeesPage, MainDocumentation, Metadata, NamedRef, PageMeta, Statistics, Subcategory,
};

/// Public endpoint of the fees API.
pub const DEFAULT_BASE_URL: &str = "https://xmlb-8xh6-ww1h.n7e.xano.io/api:public";

#[cfg(any(test, feature = "test-utils"))]
pub use transport::mock;
