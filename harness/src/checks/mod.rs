//! Endpoint checks, one module per endpoint.
//!
//! Every check issues its requests through a [`fees_client::Transport`],
//! validates what comes back and records verdicts. Expected failure modes
//! (missing key, 404, 400) become verdicts; nothing is propagated.

mod api_key;
mod categories;
mod docs;
mod fee_by_id;
mod fees;
mod metadata;
mod rate_limit;
mod search;

pub use api_key::{check_generate_api_key, ApiKey, KEY_PREFIX};
pub use categories::check_categories;
pub use docs::check_docs;
pub use fee_by_id::check_fee_by_id;
pub use fees::check_fees;
pub use metadata::check_metadata;
pub use rate_limit::check_rate_limiting;
pub use search::{check_search, check_search_missing_query, check_search_term, SHORT_QUERY};
