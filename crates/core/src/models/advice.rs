use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::{Transaction, TransactionType};

/// Health score returned when no advisor could be reached.
pub const FALLBACK_HEALTH_SCORE: u8 = 70;

/// Advice produced by the external advisory collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAdvice {
    /// Short description of spending habits
    pub summary: String,

    /// A few actionable suggestions
    pub suggestions: Vec<String>,

    /// 0..=100
    pub health_score: u8,
}

impl FinancialAdvice {
    /// Neutral, locally-defined response used whenever the advisor fails.
    pub fn fallback() -> Self {
        Self {
            summary: "AI analysis is temporarily unavailable. Please try again later.".to_string(),
            suggestions: vec![
                "Keep recording every transaction".to_string(),
                "Review your largest expenses".to_string(),
                "Revisit your budget regularly".to_string(),
            ],
            health_score: FALLBACK_HEALTH_SCORE,
        }
    }
}

/// One account as shown to the advisor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBrief {
    pub name: String,
    pub balance: Decimal,
}

/// One recent transaction as shown to the advisor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBrief {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

/// Summarized view of the ledger handed to the advisory collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryContext {
    pub total_balance: Decimal,
    pub accounts: Vec<AccountBrief>,
    pub recent_transactions: Vec<TransactionBrief>,
    pub category_names: Vec<String>,
}

/// Candidate transaction extracted from free text by the parsing collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub category_id: String,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
}

impl ParsedTransaction {
    /// Turn the candidate into a new transaction on `account_id`.
    pub fn into_transaction(self, account_id: Uuid) -> Transaction {
        Transaction::new(account_id, self.tx_type, self.amount, self.category_id, self.date)
            .with_note(self.note)
    }
}
