use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;
use super::goal::SavingGoal;
use super::transaction::Transaction;

/// The whole dataset. Everything in here is serialized and written back as
/// one snapshot on every mutation; there is no finer-grained persistence.
///
/// Each container is keyed by record `id`; order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Older snapshots were written before goals existed.
    #[serde(default)]
    pub goals: Vec<SavingGoal>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.transactions.is_empty() && self.goals.is_empty()
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn goal(&self, id: Uuid) -> Option<&SavingGoal> {
        self.goals.iter().find(|g| g.id == id)
    }
}
