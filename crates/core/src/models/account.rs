use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bank-like account (bank, card, cash wallet).
///
/// `balance` equals the baseline set when the account was created (or last
/// explicitly edited) plus the signed sum of every transaction referencing it.
/// Only the ledger mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: Uuid,

    /// Name shown in the UI (e.g., "Main checking")
    pub display_name: String,

    /// Bank or institution holding the account
    #[serde(default)]
    pub institution_name: String,

    /// Signed current balance
    pub balance: Decimal,

    /// UI color tag, one of `ACCOUNT_COLORS` by convention
    #[serde(default)]
    pub color_tag: String,
}

impl Account {
    pub fn new(
        display_name: impl Into<String>,
        institution_name: impl Into<String>,
        opening_balance: Decimal,
        color_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            institution_name: institution_name.into(),
            balance: opening_balance,
            color_tag: color_tag.into(),
        }
    }
}

/// Caller-supplied account fields for `Ledger::upsert_account`.
///
/// `balance` is optional: when editing an existing account and no balance is
/// supplied, the stored balance is kept. A new account without a balance
/// starts at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    pub id: Uuid,
    pub display_name: String,
    pub institution_name: String,
    pub color_tag: String,
    pub balance: Option<Decimal>,
}

impl AccountDraft {
    /// Draft for a brand new account (fresh id, no explicit balance).
    pub fn new(
        display_name: impl Into<String>,
        institution_name: impl Into<String>,
        color_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            institution_name: institution_name.into(),
            color_tag: color_tag.into(),
            balance: None,
        }
    }

    /// Draft that edits the account with the given id.
    pub fn edit(
        id: Uuid,
        display_name: impl Into<String>,
        institution_name: impl Into<String>,
        color_tag: impl Into<String>,
    ) -> Self {
        Self {
            id,
            ..Self::new(display_name, institution_name, color_tag)
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance);
        self
    }
}

impl From<Account> for AccountDraft {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name,
            institution_name: account.institution_name,
            color_tag: account.color_tag,
            balance: Some(account.balance),
        }
    }
}
