pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use errors::CoreError;
use models::{
    account::{Account, AccountDraft},
    document::Document,
    goal::SavingGoal,
    settings::Settings,
    summary::{CategoryTotal, LedgerSummary, MonthlyTotals},
    transaction::{Transaction, TransactionType},
};
use services::{
    ledger_service::LedgerService,
    notifier::{ChangeNotifier, SubscriptionId},
    summary_service::SummaryService,
};
use storage::{format, FileStore, SnapshotStore};

/// Main entry point for the ZenWealth core library: the ledger engine.
///
/// Every operation re-reads the snapshot from the store. Mutations follow
/// load → mutate → store → notify, and always write the *whole* document;
/// there are no partial updates. Either the full new document is persisted
/// or the previous one stays exactly as it was.
///
/// Within one `Ledger` the load-mutate-store sequence runs under a commit
/// lock. Separate `Ledger`s (or processes) sharing a slot are last-write-wins.
#[must_use]
pub struct Ledger {
    store: Arc<dyn SnapshotStore>,
    notifier: Arc<ChangeNotifier>,
    ledger_service: LedgerService,
    summary_service: SummaryService,
    commit_lock: Mutex<()>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("observers", &self.notifier.observer_count())
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Ledger over `store`, broadcasting changes on `notifier`.
    pub fn new(store: Arc<dyn SnapshotStore>, notifier: Arc<ChangeNotifier>) -> Self {
        Self {
            store,
            notifier,
            ledger_service: LedgerService::new(),
            summary_service: SummaryService::new(),
            commit_lock: Mutex::new(()),
        }
    }

    /// Ledger over `store` with its own notifier.
    pub fn with_store(store: Arc<dyn SnapshotStore>) -> Self {
        Self::new(store, Arc::new(ChangeNotifier::new()))
    }

    /// File-backed ledger at the settings' snapshot path.
    pub fn open(settings: &Settings) -> Self {
        Self::with_store(Arc::new(FileStore::new(settings.snapshot_path())))
    }

    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    /// Register a callback fired after every persisted mutation.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Fresh copy of the whole document.
    pub fn snapshot(&self) -> Result<Document, CoreError> {
        self.store.load()
    }

    // ── Accounts ────────────────────────────────────────────────────

    pub fn list_accounts(&self) -> Result<Vec<Account>, CoreError> {
        Ok(self.store.load()?.accounts)
    }

    pub fn get_account(&self, id: Uuid) -> Result<Option<Account>, CoreError> {
        Ok(self.store.load()?.account(id).cloned())
    }

    /// Create or edit an account. Returns the stored record.
    ///
    /// On edit the balance is preserved unless `draft.balance` is set.
    pub fn upsert_account(&self, draft: AccountDraft) -> Result<Account, CoreError> {
        self.commit(|doc| {
            let account = self.ledger_service.upsert_account(doc, draft)?;
            Ok((account, true))
        })
    }

    /// Delete an account and every transaction booked against it, in one
    /// snapshot write. Returns `false` (and writes nothing) if the account
    /// does not exist.
    pub fn delete_account(&self, id: Uuid) -> Result<bool, CoreError> {
        self.commit(|doc| match self.ledger_service.delete_account(doc, id) {
            Some((account, cascaded)) => {
                tracing::info!(
                    account = %account.id,
                    cascaded,
                    "account deleted with its transactions"
                );
                Ok((true, true))
            }
            None => Ok((false, false)),
        })
    }

    // ── Transactions ────────────────────────────────────────────────

    pub fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.store.load()?.transactions)
    }

    pub fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, CoreError> {
        Ok(self.store.load()?.transaction(id).cloned())
    }

    /// Create or edit a transaction, adjusting account balances with
    /// reverse-then-apply. Fails with `UnknownAccount` if `accountId` does
    /// not exist; nothing is written in that case.
    pub fn upsert_transaction(&self, transaction: Transaction) -> Result<(), CoreError> {
        self.commit(|doc| {
            self.ledger_service.upsert_transaction(doc, transaction)?;
            Ok(((), true))
        })
    }

    /// Delete a transaction and give its effect back to its account.
    /// Unknown ids are a no-op returning `false`.
    pub fn delete_transaction(&self, id: Uuid) -> Result<bool, CoreError> {
        self.commit(|doc| {
            let removed = self.ledger_service.delete_transaction(doc, id)?.is_some();
            Ok((removed, removed))
        })
    }

    /// Transactions booked against one account, newest first.
    pub fn transactions_for_account(&self, account_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        let doc = self.store.load()?;
        Ok(self
            .summary_service
            .transactions_for_account(&doc, account_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// The `limit` most recent transactions, newest first.
    pub fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, CoreError> {
        let doc = self.store.load()?;
        Ok(self
            .summary_service
            .recent_transactions(&doc, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Search notes and category names (case-insensitive), optionally only
    /// one type. Newest first.
    pub fn search_transactions(
        &self,
        query: &str,
        type_filter: Option<TransactionType>,
    ) -> Result<Vec<Transaction>, CoreError> {
        let doc = self.store.load()?;
        Ok(self
            .summary_service
            .search_transactions(&doc, query, type_filter)
            .into_iter()
            .cloned()
            .collect())
    }

    // ── Goals ───────────────────────────────────────────────────────

    pub fn list_goals(&self) -> Result<Vec<SavingGoal>, CoreError> {
        Ok(self.store.load()?.goals)
    }

    pub fn get_goal(&self, id: Uuid) -> Result<Option<SavingGoal>, CoreError> {
        Ok(self.store.load()?.goal(id).cloned())
    }

    /// Insert or replace a goal. A non-positive target is rejected with
    /// `InvalidGoalTarget` and never persisted.
    pub fn upsert_goal(&self, goal: SavingGoal) -> Result<(), CoreError> {
        self.commit(|doc| {
            self.ledger_service.upsert_goal(doc, goal)?;
            Ok(((), true))
        })
    }

    pub fn delete_goal(&self, id: Uuid) -> Result<bool, CoreError> {
        self.commit(|doc| {
            let removed = self.ledger_service.delete_goal(doc, id).is_some();
            Ok((removed, removed))
        })
    }

    /// Progress of one goal in percent (0..=100), `None` if it doesn't exist.
    pub fn goal_progress(&self, id: Uuid) -> Result<Option<Decimal>, CoreError> {
        let doc = self.store.load()?;
        Ok(doc.goal(id).map(|g| self.summary_service.goal_progress(g)))
    }

    // ── Aggregations ────────────────────────────────────────────────

    pub fn total_balance(&self) -> Result<Decimal, CoreError> {
        self.summary_service.total_balance(&self.store.load()?)
    }

    /// Income and expense totals for one month. `month` must be in `1..=12`.
    pub fn monthly_totals(&self, year: i32, month: u32) -> Result<MonthlyTotals, CoreError> {
        self.summary_service
            .monthly_totals(&self.store.load()?, year, month)
    }

    /// Totals for the `months` months ending at `year`-`month`, oldest first.
    pub fn monthly_trend(
        &self,
        year: i32,
        month: u32,
        months: u32,
    ) -> Result<Vec<MonthlyTotals>, CoreError> {
        self.summary_service
            .monthly_trend(&self.store.load()?, year, month, months)
    }

    pub fn category_expense_totals(&self) -> Result<Vec<CategoryTotal>, CoreError> {
        self.summary_service
            .category_expense_totals(&self.store.load()?)
    }

    pub fn summary(&self, today: NaiveDate) -> Result<LedgerSummary, CoreError> {
        self.summary_service.summary(&self.store.load()?, today)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Pretty JSON of the current document.
    pub fn export_json(&self) -> Result<String, CoreError> {
        format::encode_pretty(&self.store.load()?)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Run one load → mutate → store → notify cycle under the commit lock.
    ///
    /// `apply` returns its result plus whether the document changed. An
    /// unchanged document is not written and fires no notification. An
    /// `Err` from `apply` or from the store aborts before anything is
    /// persisted.
    fn commit<T>(
        &self,
        apply: impl FnOnce(&mut Document) -> Result<(T, bool), CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self
            .commit_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut document = self.store.load()?;
        let (value, changed) = apply(&mut document)?;
        if changed {
            self.store.store(&document)?;
            self.notifier.notify();
        }
        Ok(value)
    }
}
