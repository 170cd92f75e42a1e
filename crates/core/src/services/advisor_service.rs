use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::advice::{
    AccountBrief, AdvisoryContext, FinancialAdvice, ParsedTransaction, TransactionBrief,
};
use crate::models::category::{category_name, is_known_category, CATEGORIES, FALLBACK_CATEGORY_ID};
use crate::models::document::Document;
use crate::models::settings::{Settings, DEFAULT_RECENT_WINDOW};
use crate::providers::registry::AdvisorRegistry;
use crate::services::summary_service::SummaryService;

/// Front door to the external advisory collaborators.
///
/// Tries each registered provider in order. Failures never escape the
/// non-`try_` methods: parsing degrades to `None`, advice degrades to
/// [`FinancialAdvice::fallback`]. Nothing here touches the ledger; callers
/// pass a parsed result to `Ledger::upsert_transaction` themselves.
pub struct AdvisorService {
    registry: AdvisorRegistry,
    summary_service: SummaryService,
    window: usize,
}

impl AdvisorService {
    pub fn new(registry: AdvisorRegistry) -> Self {
        Self {
            registry,
            summary_service: SummaryService::new(),
            window: DEFAULT_RECENT_WINDOW,
        }
    }

    /// Service with every provider the settings have a key for, showing the
    /// advisor `settings.recent_transaction_window` recent transactions.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(AdvisorRegistry::new_with_defaults(settings))
            .with_window(settings.recent_transaction_window)
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// How many recent transactions go into the advisory context.
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn has_provider(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.registry.provider_names()
    }

    // ── Quick entry ─────────────────────────────────────────────────

    /// Parse free text into a candidate transaction, or `None` when the text
    /// is blank, no provider answered, or the answer was unusable.
    ///
    /// Categories outside the taxonomy are mapped to `cat-other`.
    pub async fn parse_transaction(&self, text: &str, today: NaiveDate) -> Option<ParsedTransaction> {
        if text.trim().is_empty() {
            return None;
        }
        match self.try_parse_transaction(text, today).await {
            Ok(parsed) => Self::normalize(parsed),
            Err(e) => {
                tracing::warn!("transaction parsing failed: {e}");
                None
            }
        }
    }

    /// Like [`parse_transaction`](Self::parse_transaction) but reports why
    /// nothing came back. No normalization is applied.
    pub async fn try_parse_transaction(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<ParsedTransaction, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider("transaction parsing".into()));
        }

        let mut last_error = None;
        for provider in self.registry.providers() {
            match provider.parse_transaction(text.trim(), CATEGORIES, today).await {
                Ok(parsed) => return Ok(parsed),
                Err(e) => {
                    tracing::debug!(provider = provider.name(), "parse attempt failed: {e}");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| CoreError::NoProvider("transaction parsing".into())))
    }

    fn normalize(mut parsed: ParsedTransaction) -> Option<ParsedTransaction> {
        if parsed.amount <= Decimal::ZERO {
            tracing::warn!(amount = %parsed.amount, "parsed transaction has no positive amount");
            return None;
        }
        if !is_known_category(&parsed.category_id) {
            parsed.category_id = FALLBACK_CATEGORY_ID.to_string();
        }
        parsed.note = parsed.note.trim().to_string();
        Some(parsed)
    }

    // ── Advice ──────────────────────────────────────────────────────

    /// Summarize the document for the advisor: total balance, per-account
    /// balances and the `window` most recent transactions.
    pub fn build_context(
        &self,
        document: &Document,
        window: usize,
    ) -> Result<AdvisoryContext, CoreError> {
        Ok(AdvisoryContext {
            total_balance: self.summary_service.total_balance(document)?,
            accounts: document
                .accounts
                .iter()
                .map(|a| AccountBrief {
                    name: a.display_name.clone(),
                    balance: a.balance,
                })
                .collect(),
            recent_transactions: self
                .summary_service
                .recent_transactions(document, window)
                .into_iter()
                .map(|t| TransactionBrief {
                    tx_type: t.tx_type,
                    amount: t.amount,
                    category: category_name(&t.category_id).to_string(),
                    date: t.date,
                })
                .collect(),
            category_names: CATEGORIES.iter().map(|c| c.name.to_string()).collect(),
        })
    }

    /// Advice for the document over the configured window, or the fixed
    /// fallback if no provider produced a usable answer.
    pub async fn financial_advice(&self, document: &Document) -> FinancialAdvice {
        let advice = match self.build_context(document, self.window) {
            Ok(context) => self.try_financial_advice(&context).await,
            Err(e) => Err(e),
        };
        match advice {
            Ok(mut advice) => {
                advice.health_score = advice.health_score.min(100);
                advice
            }
            Err(e) => {
                tracing::warn!("financial advice unavailable, using fallback: {e}");
                FinancialAdvice::fallback()
            }
        }
    }

    pub async fn try_financial_advice(
        &self,
        context: &AdvisoryContext,
    ) -> Result<FinancialAdvice, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider("financial advice".into()));
        }

        let mut last_error = None;
        for provider in self.registry.providers() {
            match provider.financial_advice(context).await {
                Ok(advice) => return Ok(advice),
                Err(e) => {
                    tracing::debug!(provider = provider.name(), "advice attempt failed: {e}");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| CoreError::NoProvider("financial advice".into())))
    }
}
