use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::account::{Account, AccountDraft};
use crate::models::category::is_known_category;
use crate::models::document::Document;
use crate::models::goal::SavingGoal;
use crate::models::transaction::Transaction;

/// Invariant-preserving mutations on an in-memory [`Document`].
///
/// Pure business logic, no I/O. The caller loads the document, applies one
/// of these, and persists the result. Every method validates before it
/// touches the document, so an `Err` leaves the document unchanged.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Insert a new account or edit an existing one in place.
    ///
    /// Editing never recomputes the balance from transactions: the stored
    /// balance is kept unless the draft carries an explicit one.
    pub fn upsert_account(
        &self,
        document: &mut Document,
        draft: AccountDraft,
    ) -> Result<Account, CoreError> {
        if draft.display_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Account name must not be empty".into(),
            ));
        }

        if let Some(existing) = document.account_mut(draft.id) {
            existing.display_name = draft.display_name;
            existing.institution_name = draft.institution_name;
            existing.color_tag = draft.color_tag;
            if let Some(balance) = draft.balance {
                existing.balance = balance;
            }
            return Ok(existing.clone());
        }

        let account = Account {
            id: draft.id,
            display_name: draft.display_name,
            institution_name: draft.institution_name,
            balance: draft.balance.unwrap_or(Decimal::ZERO),
            color_tag: draft.color_tag,
        };
        document.accounts.push(account.clone());
        Ok(account)
    }

    /// Remove an account together with every transaction booked against it.
    /// Returns the removed account and the number of cascaded transactions,
    /// or `None` if no such account exists.
    pub fn delete_account(&self, document: &mut Document, id: Uuid) -> Option<(Account, usize)> {
        let idx = document.accounts.iter().position(|a| a.id == id)?;
        let account = document.accounts.remove(idx);

        let before = document.transactions.len();
        document.transactions.retain(|t| t.account_id != id);
        let cascaded = before - document.transactions.len();

        Some((account, cascaded))
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Insert or replace a transaction, keeping account balances consistent.
    ///
    /// Reverse-then-apply: the previous version's effect is undone on the
    /// account *it* was booked against, then the new effect is applied to
    /// the target account. Old and new account may differ.
    pub fn upsert_transaction(
        &self,
        document: &mut Document,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        self.validate_transaction(&transaction)?;

        if document.account(transaction.account_id).is_none() {
            return Err(CoreError::UnknownAccount(transaction.account_id.to_string()));
        }

        let existing = document
            .transactions
            .iter()
            .position(|t| t.id == transaction.id);

        // Reverse the previous version on its own account, apply the new one
        // on the target. Both land together or not at all.
        let mut deltas = Vec::with_capacity(2);
        if let Some(idx) = existing {
            let previous = &document.transactions[idx];
            deltas.push((previous.account_id, -previous.balance_effect()));
        }
        deltas.push((transaction.account_id, transaction.balance_effect()));
        Self::adjust_balances(document, &deltas)?;

        match existing {
            Some(idx) => document.transactions[idx] = transaction,
            None => document.transactions.push(transaction),
        }
        Ok(())
    }

    /// Remove a transaction and give its effect back to its account.
    /// Returns the removed transaction, or `None` if the id is unknown.
    pub fn delete_transaction(
        &self,
        document: &mut Document,
        id: Uuid,
    ) -> Result<Option<Transaction>, CoreError> {
        let Some(idx) = document.transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let removed = &document.transactions[idx];
        let deltas = [(removed.account_id, -removed.balance_effect())];
        Self::adjust_balances(document, &deltas)?;
        Ok(Some(document.transactions.remove(idx)))
    }

    /// Add signed `deltas` to account balances. Deltas for the same account
    /// are netted first; accounts that no longer exist are skipped.
    ///
    /// All sums are checked before any balance is written, so on
    /// `AmountOverflow` the document is untouched.
    fn adjust_balances(document: &mut Document, deltas: &[(Uuid, Decimal)]) -> Result<(), CoreError> {
        let mut net: Vec<(Uuid, Decimal)> = Vec::with_capacity(deltas.len());
        for &(account_id, delta) in deltas {
            match net.iter_mut().find(|(id, _)| *id == account_id) {
                Some((_, total)) => {
                    *total = total.checked_add(delta).ok_or_else(|| overflow(account_id))?;
                }
                None => net.push((account_id, delta)),
            }
        }

        let mut updated = Vec::with_capacity(net.len());
        for (account_id, delta) in net {
            if let Some(account) = document.account(account_id) {
                let balance = account
                    .balance
                    .checked_add(delta)
                    .ok_or_else(|| overflow(account_id))?;
                updated.push((account_id, balance));
            }
        }

        for (account_id, balance) in updated {
            if let Some(account) = document.account_mut(account_id) {
                account.balance = balance;
            }
        }
        Ok(())
    }

    /// Rules:
    /// - Amount must be positive
    /// - Category must come from the fixed taxonomy
    fn validate_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        if transaction.amount <= Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must be positive, got {}",
                transaction.amount
            )));
        }
        if !is_known_category(&transaction.category_id) {
            return Err(CoreError::ValidationError(format!(
                "Unknown category '{}'",
                transaction.category_id
            )));
        }
        Ok(())
    }

    // ── Goals ───────────────────────────────────────────────────────

    pub fn upsert_goal(&self, document: &mut Document, goal: SavingGoal) -> Result<(), CoreError> {
        if goal.target_amount <= Decimal::ZERO {
            return Err(CoreError::InvalidGoalTarget(goal.target_amount));
        }
        if goal.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Goal name must not be empty".into()));
        }
        if goal.current_amount < Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "Goal current amount must not be negative, got {}",
                goal.current_amount
            )));
        }

        match document.goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal,
            None => document.goals.push(goal),
        }
        Ok(())
    }

    pub fn delete_goal(&self, document: &mut Document, id: Uuid) -> Option<SavingGoal> {
        let idx = document.goals.iter().position(|g| g.id == id)?;
        Some(document.goals.remove(idx))
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

fn overflow(account_id: Uuid) -> CoreError {
    CoreError::AmountOverflow(format!("balance of account {account_id} would overflow"))
}
