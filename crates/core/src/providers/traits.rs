use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::advice::{AdvisoryContext, FinancialAdvice, ParsedTransaction};
use crate::models::category::Category;

/// An external text-generation service used for quick entry and advice.
///
/// Implementations are best-effort and may fail at any time; callers go
/// through `AdvisorService`, which turns failures into "no result" or the
/// fallback advice.
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Extract a candidate transaction from free text such as
    /// "lunch 120 yesterday". `today` anchors relative dates.
    async fn parse_transaction(
        &self,
        text: &str,
        categories: &[Category],
        today: NaiveDate,
    ) -> Result<ParsedTransaction, CoreError>;

    /// Produce a health score, a summary and a few suggestions.
    async fn financial_advice(
        &self,
        context: &AdvisoryContext,
    ) -> Result<FinancialAdvice, CoreError>;
}
