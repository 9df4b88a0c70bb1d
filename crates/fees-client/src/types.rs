//! Data types for fees API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A government fee with its optional relationships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fee {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    /// ISO currency code (e.g., "NGN")
    pub currency: Option<String>,
    pub subcategory: Option<Subcategory>,
    pub source: Option<FeeSource>,
}

impl Fee {
    /// Name of the category this fee belongs to, via its subcategory.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.subcategory
            .as_ref()
            .and_then(|sub| sub.category.as_ref())
            .and_then(|category| category.name.as_deref())
    }

    /// Name of the agency that publishes this fee.
    #[must_use]
    pub fn agency_name(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|source| source.agency.as_ref())
            .and_then(|agency| agency.name.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subcategory {
    pub name: Option<String>,
    pub category: Option<NamedRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeSource {
    pub agency: Option<NamedRef>,
}

/// A related record of which only the name is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    pub name: Option<String>,
}

/// One page of the fees listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeesPage {
    pub items: Vec<Fee>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default = "first_page")]
    pub page_total: u32,
    #[serde(default)]
    pub total: u64,
}

// serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn first_page() -> u32 {
    1
}

/// A fee category with its fee count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub fee_count: u64,
}

impl Category {
    /// Whether `slug` names this category, by display name (case-insensitive) or id.
    #[must_use]
    pub fn matches(&self, slug: &str) -> bool {
        self.display_name.eq_ignore_ascii_case(slug) || self.id.to_string() == slug
    }
}

/// API statistics and version information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub api_version: String,
    pub statistics: Statistics,
    /// Milliseconds since the Unix epoch.
    pub last_database_update: i64,
    pub generated_at: Value,
    #[serde(default)]
    pub documentation: Option<Value>,
}

impl Metadata {
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_database_update)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Statistics {
    pub total_fees: u64,
    pub total_categories: u64,
    pub total_agencies: u64,
    pub total_subcategories: u64,
    pub total_sources: u64,
}

/// Documentation links returned by `GET /docs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocsLinks {
    pub repository: String,
    pub main_documentation: MainDocumentation,
    pub code_examples: CodeExamples,
    pub raw_links: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MainDocumentation {
    pub api_reference: String,
    pub quick_start: String,
    pub data_sources: String,
    pub readme: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodeExamples {
    pub javascript: String,
    pub python: String,
    pub curl: String,
}

/// Response from `POST /api_key/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKeyGrant {
    pub success: bool,
    pub api_key: String,
    pub message: Option<String>,
}

/// Fees of one category, resolved through the categories listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFees {
    pub category: Category,
    pub fees: Vec<Fee>,
    pub total: u64,
}

/// Filters and pagination for `GET /fees`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuery {
    pub page: u32,
    pub per_page: u32,
    pub category: Option<String>,
    pub state: Option<String>,
    pub search: Option<String>,
}

impl FeeQuery {
    pub const DEFAULT_PER_PAGE: u32 = 20;
    pub const MAX_PER_PAGE: u32 = 100;

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Page size, clamped to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, Self::MAX_PER_PAGE);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

impl Default for FeeQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
            category: None,
            state: None,
            search: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_meta_reads_camel_case() {
        let meta: PageMeta = serde_json::from_value(json!({
            "page": 2,
            "perPage": 10,
            "pageTotal": 7,
            "total": 64
        }))
        .unwrap();

        assert_eq!(meta.page, 2);
        assert_eq!(meta.per_page, 10);
        assert_eq!(meta.page_total, 7);
        assert_eq!(meta.total, 64);
    }

    #[test]
    fn page_total_defaults_to_one() {
        let meta: PageMeta = serde_json::from_value(json!({"page": 1, "total": 3})).unwrap();
        assert_eq!(meta.page_total, 1);
    }

    #[test]
    fn fee_relationships_are_optional() {
        let fee: Fee = serde_json::from_value(json!({"id": 1, "name": "NIN enrolment"})).unwrap();
        assert_eq!(fee.category_name(), None);
        assert_eq!(fee.agency_name(), None);
    }

    #[test]
    fn fee_relationship_names_resolve() {
        let fee: Fee = serde_json::from_value(json!({
            "id": 3,
            "name": "Passport renewal",
            "amount": 35000.0,
            "currency": "NGN",
            "subcategory": {"name": "Passports", "category": {"name": "Identity"}},
            "source": {"agency": {"name": "Immigration Service"}}
        }))
        .unwrap();

        assert_eq!(fee.category_name(), Some("Identity"));
        assert_eq!(fee.agency_name(), Some("Immigration Service"));
    }

    #[test]
    fn category_matches_name_or_id() {
        let category = Category {
            id: 4,
            display_name: "Identity".into(),
            fee_count: 12,
        };
        assert!(category.matches("identity"));
        assert!(category.matches("4"));
        assert!(!category.matches("transport"));
    }

    #[test]
    fn metadata_last_update_converts_millis() {
        let metadata: Metadata = serde_json::from_value(json!({
            "api_version": "1.0.0",
            "statistics": {"total_fees": 10},
            "last_database_update": 1_700_000_000_000_i64,
            "generated_at": 1_700_000_000_500_i64
        }))
        .unwrap();

        assert_eq!(metadata.statistics.total_fees, 10);
        assert_eq!(metadata.statistics.total_agencies, 0);
        let updated = metadata.last_updated().unwrap();
        assert_eq!(updated.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn per_page_is_clamped() {
        assert_eq!(FeeQuery::default().per_page(0).per_page, 1);
        assert_eq!(FeeQuery::default().per_page(500).per_page, 100);
        assert_eq!(FeeQuery::default().per_page(25).per_page, 25);
        assert_eq!(FeeQuery::default().page(0).page, 1);
    }
}
