use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, adds to the account balance
    Income,
    /// Money going out, subtracts from the account balance
    Expense,
}

impl TransactionType {
    /// Signed balance effect of `amount` for this type.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type '{other}'")),
        }
    }
}

/// A single income or expense booked against one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, stable across edits
    pub id: Uuid,

    /// The account this transaction is booked against
    pub account_id: Uuid,

    /// Always positive; direction comes from `tx_type`
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Id from the fixed category taxonomy
    pub category_id: String,

    /// Calendar date, no time component
    pub date: NaiveDate,

    #[serde(default)]
    pub note: String,
}

impl Transaction {
    pub fn new(
        account_id: Uuid,
        tx_type: TransactionType,
        amount: Decimal,
        category_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            tx_type,
            category_id: category_id.into(),
            date,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// What this transaction contributes to its account's balance.
    pub fn balance_effect(&self) -> Decimal {
        self.tx_type.signed(self.amount)
    }
}
