//! End-to-end walk through the typed client: metadata, categories, a
//! search, the first hit's details, then one category's fees.

use std::fmt;

use fees_client::{Category, CategoryFees, Fee, FeesApiError, FeesClient, Metadata, Transport};

/// Everything the workflow fetched, in step order.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub metadata: Metadata,
    pub categories: Vec<Category>,
    pub search_term: String,
    pub search_results: Vec<Fee>,
    /// Details of the first search result, if there was one.
    pub first_fee: Option<Fee>,
    pub category_fees: CategoryFees,
}

/// Run the five workflow steps, stopping at the first error.
///
/// # Errors
/// Returns the first [`FeesApiError`] any step produces.
pub async fn complete_workflow<T: Transport>(
    client: &FeesClient<T>,
    search_term: &str,
    category: &str,
) -> Result<WorkflowReport, FeesApiError> {
    tracing::info!(step = 1, "getting API metadata");
    let metadata = client.metadata().await?;

    tracing::info!(step = 2, "getting all categories");
    let categories = client.categories().await?;

    tracing::info!(step = 3, search_term, "searching fees");
    let search_results = client.search_fees(search_term).await?;

    let first_fee = match search_results.first() {
        Some(hit) => {
            tracing::info!(step = 4, fee_id = hit.id, "getting details of first result");
            Some(client.get_fee(hit.id).await?)
        }
        None => None,
    };

    tracing::info!(step = 5, category, "getting fees by category");
    let category_fees = client.fees_by_category(category).await?;

    Ok(WorkflowReport {
        metadata,
        categories,
        search_term: search_term.trim().to_string(),
        search_results,
        first_fee,
        category_fees,
    })
}

impl WorkflowReport {
    /// Human-readable account of each step.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WorkflowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.metadata.statistics;

        writeln!(f, "=== Government Fees API - Complete Workflow ===\n")?;

        writeln!(f, "Step 1: API metadata")?;
        writeln!(f, "  API Version: {}", self.metadata.api_version)?;
        writeln!(f, "  Total Fees: {}", stats.total_fees)?;
        writeln!(f, "  Total Categories: {}", stats.total_categories)?;
        writeln!(f, "  Total Agencies: {}", stats.total_agencies)?;
        if let Some(updated) = self.metadata.last_updated() {
            writeln!(f, "  Last Updated: {}", updated.to_rfc3339())?;
        }

        writeln!(f, "\nStep 2: {} categories", self.categories.len())?;
        for category in &self.categories {
            writeln!(f, "  {}: {} fees", category.display_name, category.fee_count)?;
        }

        writeln!(
            f,
            "\nStep 3: {} results for {:?}",
            self.search_results.len(),
            self.search_term
        )?;
        for fee in &self.search_results {
            writeln!(f, "  - {}", fee.name)?;
        }

        match &self.first_fee {
            Some(fee) => {
                writeln!(f, "\nStep 4: details of fee {}", fee.id)?;
                writeln!(f, "  Name: {}", fee.name)?;
                if let Some(amount) = fee.amount {
                    let currency = fee.currency.as_deref().unwrap_or("NGN");
                    writeln!(f, "  Amount: {currency} {amount}")?;
                }
                writeln!(f, "  Category: {}", fee.category_name().unwrap_or("N/A"))?;
                writeln!(f, "  Agency: {}", fee.agency_name().unwrap_or("N/A"))?;
            }
            None => writeln!(f, "\nStep 4: skipped, no search results")?,
        }

        writeln!(
            f,
            "\nStep 5: {} fees in category {}",
            self.category_fees.total, self.category_fees.category.display_name
        )?;
        for fee in &self.category_fees.fees {
            writeln!(f, "  - {}", fee.name)?;
        }

        write!(f, "\n=== Workflow Complete ===")
    }
}
