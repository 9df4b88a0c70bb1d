//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - Declarative HTTP stubs over `wiremock`

pub mod http_mock;
