//! Typed operations over the fees API.
//!
//! # Example
//!
//! ```ignore
//! use fees_client::{FeeQuery, FeesClient, HttpTransport, DEFAULT_BASE_URL};
//!
//! let client = FeesClient::new(HttpTransport::new(DEFAULT_BASE_URL)).with_api_key("nga_...");
//! let page = client.list_fees(&FeeQuery::default().category("identity")).await?;
//! println!("{} of {} fees", page.items.len(), page.meta.total);
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use crate::decode::{self, DecodeError};
use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};
use crate::types::{
    ApiKeyGrant, Category, CategoryFees, DocsLinks, Fee, FeeQuery, FeesPage, Metadata,
};

/// Minimum search query length, counted in characters after trimming.
pub const MIN_SEARCH_LEN: usize = 2;

/// Pause between page requests in [`FeesClient::list_all_fees`].
const PAGE_DELAY: Duration = Duration::from_millis(100);

/// Prefix the API uses for application-level error codes.
const API_ERROR_PREFIX: &str = "ERROR_CODE";

/// Errors that can occur when calling the fees API.
#[derive(Debug, Error)]
pub enum FeesApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Fee not found
    #[error("Fee not found: {0}")]
    NotFound(String),

    /// Category could not be resolved by name or id
    #[error("Category \"{0}\" not found")]
    UnknownCategory(String),

    /// Rejected locally, no request was sent
    #[error("Search query must be at least 2 characters long, got {0:?}")]
    InvalidQuery(String),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

/// Trim `query` and return it if it is long enough to send.
#[must_use]
pub fn normalize_search_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (trimmed.chars().count() >= MIN_SEARCH_LEN).then_some(trimmed)
}

/// Client for the fees API over any [`Transport`].
pub struct FeesClient<T> {
    transport: T,
    api_key: Option<String>,
}

impl<T: Transport> FeesClient<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            api_key: None,
        }
    }

    /// Attach the key sent as the `api_key` query parameter on authenticated calls.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn authed(&self, request: ApiRequest) -> ApiRequest {
        request.query_opt("api_key", self.api_key.as_deref())
    }

    async fn fetch<D: DeserializeOwned>(&self, request: ApiRequest) -> Result<D, FeesApiError> {
        let response = self.transport.send(&request).await?;
        if let Some(err) = api_error(&response) {
            tracing::debug!(request = %request, error = %err, "fees API returned an error");
            return Err(err);
        }
        Ok(decode::decode(&response)?)
    }

    /// `GET /docs`: documentation links (no authentication).
    ///
    /// # Errors
    /// Returns an error if the request fails or the body is not a docs document.
    pub async fn docs(&self) -> Result<DocsLinks, FeesApiError> {
        self.fetch(ApiRequest::get("/docs")).await
    }

    /// `POST /api_key/generate`, optionally associating an email address.
    ///
    /// # Errors
    /// Returns an error if the request fails or the key could not be issued.
    pub async fn generate_api_key(&self, email: Option<&str>) -> Result<ApiKeyGrant, FeesApiError> {
        let body = email.map_or_else(|| json!({}), |email| json!({ "user_email": email }));
        self.fetch(ApiRequest::post("/api_key/generate", body)).await
    }

    /// `GET /fees`: one page of fees with optional filters.
    ///
    /// # Errors
    /// Returns an error if the request fails or the API rejects it.
    pub async fn list_fees(&self, query: &FeeQuery) -> Result<FeesPage, FeesApiError> {
        let request = self
            .authed(ApiRequest::get("/fees"))
            .query("page", query.page)
            .query("per_page", query.per_page)
            .query_opt("category", query.category.as_deref())
            .query_opt("state", query.state.as_deref())
            .query_opt("search", query.search.as_deref());

        let page: FeesPage = self.fetch(request).await?;
        tracing::debug!(
            page = page.meta.page,
            page_total = page.meta.page_total,
            items = page.items.len(),
            "fetched fees page"
        );
        Ok(page)
    }

    /// `GET /fees/{id}`: a single fee with its relationships.
    ///
    /// # Errors
    /// Returns [`FeesApiError::NotFound`] for an unknown id.
    pub async fn get_fee(&self, id: i64) -> Result<Fee, FeesApiError> {
        let request = self.authed(ApiRequest::get(format!("/fees/{id}")));
        match self.fetch(request).await {
            Err(FeesApiError::Api { status: 404, .. }) => Err(FeesApiError::NotFound(id.to_string())),
            other => other,
        }
    }

    /// `GET /fees/search`: fees whose name or description match `query`.
    ///
    /// # Errors
    /// Returns [`FeesApiError::InvalidQuery`] without sending anything when
    /// the trimmed query is shorter than [`MIN_SEARCH_LEN`].
    pub async fn search_fees(&self, query: &str) -> Result<Vec<Fee>, FeesApiError> {
        let q = normalize_search_query(query)
            .ok_or_else(|| FeesApiError::InvalidQuery(query.to_string()))?;
        self.fetch(self.authed(ApiRequest::get("/fees/search")).query("q", q))
            .await
    }

    /// `GET /categories`: all categories with fee counts.
    ///
    /// # Errors
    /// Returns an error if the request fails or the API rejects it.
    pub async fn categories(&self) -> Result<Vec<Category>, FeesApiError> {
        self.fetch(self.authed(ApiRequest::get("/categories"))).await
    }

    /// `GET /metadata`: statistics and version information.
    ///
    /// # Errors
    /// Returns an error if the request fails or the API rejects it.
    pub async fn metadata(&self) -> Result<Metadata, FeesApiError> {
        self.fetch(self.authed(ApiRequest::get("/metadata"))).await
    }

    /// Walk every page matching `filter`, using the largest page size.
    ///
    /// # Errors
    /// Returns the first page error encountered.
    pub async fn list_all_fees(&self, filter: &FeeQuery) -> Result<Vec<Fee>, FeesApiError> {
        let mut query = filter.clone().per_page(FeeQuery::MAX_PER_PAGE).page(1);
        let mut fees = Vec::new();

        loop {
            let page = self.list_fees(&query).await?;
            fees.extend(page.items);

            if query.page >= page.meta.page_total {
                break;
            }
            query.page += 1;
            tokio::time::sleep(PAGE_DELAY).await;
        }

        tracing::debug!(count = fees.len(), "retrieved all fees");
        Ok(fees)
    }

    /// Resolve `slug` against the categories listing, then fetch its fees.
    ///
    /// # Errors
    /// Returns [`FeesApiError::UnknownCategory`] when no category matches.
    pub async fn fees_by_category(&self, slug: &str) -> Result<CategoryFees, FeesApiError> {
        let category = self
            .categories()
            .await?
            .into_iter()
            .find(|category| category.matches(slug))
            .ok_or_else(|| FeesApiError::UnknownCategory(slug.to_string()))?;

        let page = self
            .list_fees(
                &FeeQuery::default()
                    .category(slug)
                    .per_page(FeeQuery::MAX_PER_PAGE),
            )
            .await?;

        Ok(CategoryFees {
            category,
            fees: page.items,
            total: page.meta.total,
        })
    }
}

/// Detect an error response: an application error code in the body, or a
/// non-2xx status.
fn api_error(response: &RawResponse) -> Option<FeesApiError> {
    let body: Option<Value> = serde_json::from_str(&response.body).ok();
    let field = |name: &str| {
        body.as_ref()
            .and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let code = field("code");
    let coded = code
        .as_deref()
        .is_some_and(|c| c.starts_with(API_ERROR_PREFIX));

    if !coded && response.is_success() {
        return None;
    }

    let message = field("message").unwrap_or_else(|| {
        if response.body.is_empty() {
            "Unknown API error".to_string()
        } else {
            response.body.clone()
        }
    });

    Some(FeesApiError::Api {
        status: response.status,
        code,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    fn page(items: &Value, page: u32, page_total: u32) -> Value {
        json!({
            "items": items,
            "meta": {"page": page, "perPage": 100, "pageTotal": page_total, "total": 3}
        })
    }

    #[test]
    fn search_query_is_trimmed() {
        assert_eq!(normalize_search_query("  NIN "), Some("NIN"));
        assert_eq!(normalize_search_query(" a "), None);
        assert_eq!(normalize_search_query(""), None);
        assert_eq!(normalize_search_query("é"), None);
        assert_eq!(normalize_search_query("éé"), Some("éé"));
    }

    #[tokio::test]
    async fn short_search_is_rejected_before_sending() {
        let client = FeesClient::new(MockTransport::unreachable()).with_api_key("nga_key");

        let result = client.search_fees(" a ").await;

        assert!(matches!(result, Err(FeesApiError::InvalidQuery(q)) if q == " a "));
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn docs_decode_without_a_key() {
        let client = FeesClient::new(MockTransport::new(|_| {
            Ok(RawResponse::json(
                200,
                &json!({
                    "repository": "https://github.com/example/fees-api",
                    "main_documentation": {
                        "api_reference": "https://example.com/API_REFERENCE.md",
                        "quick_start": "https://example.com/QUICK_START.md",
                        "data_sources": "https://example.com/DATA_SOURCES.md",
                        "readme": "https://example.com/README.md"
                    },
                    "code_examples": {
                        "javascript": "https://example.com/javascript-example.js",
                        "python": "https://example.com/python-example.py"
                    },
                    "raw_links": {}
                }),
            ))
        }));

        let docs = client.docs().await.unwrap();

        assert_eq!(docs.repository, "https://github.com/example/fees-api");
        assert_eq!(
            docs.main_documentation.quick_start,
            "https://example.com/QUICK_START.md"
        );
        assert_eq!(docs.code_examples.curl, "");
        assert_eq!(docs.raw_links, json!({}));

        let calls = client.transport().calls();
        assert_eq!(calls[0].path, "/docs");
        assert_eq!(calls[0].query_value("api_key"), None);
    }

    #[tokio::test]
    async fn docs_without_repository_is_a_decode_error() {
        let client = FeesClient::new(MockTransport::new(|_| {
            Ok(RawResponse::json(200, &json!({"raw_links": {}})))
        }));

        assert!(matches!(
            client.docs().await,
            Err(FeesApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn api_key_is_sent_as_query_parameter() {
        let client = FeesClient::new(MockTransport::new(|_| {
            Ok(RawResponse::json(200, &json!([])))
        }))
        .with_api_key("nga_key");

        client.categories().await.unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls[0].query_value("api_key"), Some("nga_key"));
    }

    #[tokio::test]
    async fn coded_error_body_is_an_api_error_even_on_200() {
        let client = FeesClient::new(MockTransport::new(|_| {
            Ok(RawResponse::json(
                200,
                &json!({"code": "ERROR_CODE_ACCESS_DENIED", "message": "Invalid API key"}),
            ))
        }));

        let err = client.metadata().await.unwrap_err();

        match err {
            FeesApiError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 200);
                assert_eq!(code.as_deref(), Some("ERROR_CODE_ACCESS_DENIED"));
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_fee_is_not_found() {
        let client = FeesClient::new(MockTransport::new(|_| {
            Ok(RawResponse::json(404, &json!({"message": "Not Found"})))
        }))
        .with_api_key("nga_key");

        let result = client.get_fee(99_999).await;

        assert!(matches!(result, Err(FeesApiError::NotFound(id)) if id == "99999"));
    }

    #[tokio::test]
    async fn generate_key_posts_email_when_given() {
        let client = FeesClient::new(MockTransport::new(|_| {
            Ok(RawResponse::json(
                200,
                &json!({"success": true, "api_key": "nga_abc", "message": "Save this key"}),
            ))
        }));

        let grant = client.generate_api_key(Some("a@example.com")).await.unwrap();

        assert_eq!(grant.api_key, "nga_abc");
        let calls = client.transport().calls();
        assert_eq!(calls[0].body, Some(json!({"user_email": "a@example.com"})));
    }

    #[tokio::test(start_paused = true)]
    async fn list_all_fees_follows_page_total() {
        let client = FeesClient::new(MockTransport::new(|request| {
            let body = match request.query_value("page") {
                Some("1") => page(&json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]), 1, 2),
                _ => page(&json!([{"id": 3, "name": "C"}]), 2, 2),
            };
            Ok(RawResponse::json(200, &body))
        }))
        .with_api_key("nga_key");

        let fees = client
            .list_all_fees(&FeeQuery::default().category("identity"))
            .await
            .unwrap();

        assert_eq!(fees.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        let calls = client.transport().calls();
        assert_eq!(calls.len(), 2);
        assert!(calls
            .iter()
            .all(|c| c.query_value("per_page") == Some("100")
                && c.query_value("category") == Some("identity")));
    }

    #[tokio::test]
    async fn fees_by_category_resolves_display_name() {
        let client = FeesClient::new(MockTransport::new(|request| {
            let body = if request.path == "/categories" {
                json!([
                    {"id": 1, "display_name": "Identity", "fee_count": 2},
                    {"id": 2, "display_name": "Transport", "fee_count": 5}
                ])
            } else {
                page(&json!([{"id": 7, "name": "NIN slip"}]), 1, 1)
            };
            Ok(RawResponse::json(200, &body))
        }))
        .with_api_key("nga_key");

        let result = client.fees_by_category("IDENTITY").await.unwrap();

        assert_eq!(result.category.id, 1);
        assert_eq!(result.fees.len(), 1);
        assert_eq!(result.total, 3);
    }

    #[tokio::test]
    async fn unknown_category_skips_fees_request() {
        let client = FeesClient::new(MockTransport::new(|_| {
            Ok(RawResponse::json(200, &json!([])))
        }))
        .with_api_key("nga_key");

        let result = client.fees_by_category("nope").await;

        assert!(matches!(result, Err(FeesApiError::UnknownCategory(_))));
        assert_eq!(client.transport().calls_to("/fees"), 0);
    }
}
