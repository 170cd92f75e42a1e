use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::category::{category_name, CATEGORIES};
use crate::models::document::Document;
use crate::models::goal::SavingGoal;
use crate::models::summary::{CategoryTotal, LedgerSummary, MonthlyTotals};
use crate::models::transaction::{Transaction, TransactionType};

/// Derived views over a document: totals, breakdowns, listings.
/// Nothing here is persisted.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of every account's balance.
    pub fn total_balance(&self, document: &Document) -> Result<Decimal, CoreError> {
        checked_sum(document.accounts.iter().map(|a| a.balance), "total balance")
    }

    /// Income/expense totals for transactions dated in `year`-`month`.
    /// `month` is 1-based; anything outside `1..=12` is rejected.
    pub fn monthly_totals(
        &self,
        document: &Document,
        year: i32,
        month: u32,
    ) -> Result<MonthlyTotals, CoreError> {
        validate_month(month)?;
        let in_month = |ty: TransactionType, what: &str| {
            checked_sum(
                document
                    .transactions
                    .iter()
                    .filter(|t| t.tx_type == ty && t.date.year() == year && t.date.month() == month)
                    .map(|t| t.amount),
                what,
            )
        };
        Ok(MonthlyTotals {
            income: in_month(TransactionType::Income, "monthly income")?,
            expense: in_month(TransactionType::Expense, "monthly expense")?,
            ..MonthlyTotals::empty(year, month)
        })
    }

    /// Totals for the `months` calendar months ending at `year`-`month`,
    /// oldest first.
    pub fn monthly_trend(
        &self,
        document: &Document,
        year: i32,
        month: u32,
        months: u32,
    ) -> Result<Vec<MonthlyTotals>, CoreError> {
        validate_month(month)?;
        let end = i64::from(year) * 12 + i64::from(month) - 1;
        (0..i64::from(months))
            .rev()
            .map(|back| {
                let idx = end - back;
                let y = idx.div_euclid(12) as i32;
                let m = idx.rem_euclid(12) as u32 + 1;
                self.monthly_totals(document, y, m)
            })
            .collect()
    }

    /// Expense totals grouped by category, in taxonomy order. Categories
    /// with no spending are omitted; ids outside the taxonomy come last.
    pub fn category_expense_totals(&self, document: &Document) -> Result<Vec<CategoryTotal>, CoreError> {
        let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
        for tx in document
            .transactions
            .iter()
            .filter(|t| t.tx_type == TransactionType::Expense)
        {
            let total = by_category.entry(tx.category_id.as_str()).or_insert(Decimal::ZERO);
            *total = total.checked_add(tx.amount).ok_or_else(|| {
                CoreError::AmountOverflow(format!("expense total for '{}'", tx.category_id))
            })?;
        }

        let mut totals: Vec<CategoryTotal> = by_category
            .into_iter()
            .filter(|(_, total)| *total > Decimal::ZERO)
            .map(|(id, total)| CategoryTotal {
                category_id: id.to_string(),
                category_name: category_name(id).to_string(),
                total,
            })
            .collect();

        let rank = |id: &str| {
            CATEGORIES
                .iter()
                .position(|c| c.id == id)
                .unwrap_or(usize::MAX)
        };
        // BTreeMap already ordered by id, so the sort is stable for unknowns.
        totals.sort_by_key(|t| rank(&t.category_id));
        Ok(totals)
    }

    pub fn goal_progress(&self, goal: &SavingGoal) -> Decimal {
        goal.progress_pct()
    }

    /// Transactions ordered newest date first, at most `limit` of them.
    pub fn recent_transactions<'a>(&self, document: &'a Document, limit: usize) -> Vec<&'a Transaction> {
        let mut txs: Vec<&Transaction> = document.transactions.iter().collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs.truncate(limit);
        txs
    }

    /// Case-insensitive search on the note and the category name, optionally
    /// restricted to one type. An empty query matches everything.
    /// Returns newest first.
    pub fn search_transactions<'a>(
        &self,
        document: &'a Document,
        query: &str,
        type_filter: Option<TransactionType>,
    ) -> Vec<&'a Transaction> {
        let q = query.trim().to_lowercase();
        let mut txs: Vec<&Transaction> = document
            .transactions
            .iter()
            .filter(|t| type_filter.map_or(true, |ty| t.tx_type == ty))
            .filter(|t| {
                q.is_empty()
                    || t.note.to_lowercase().contains(&q)
                    || category_name(&t.category_id).to_lowercase().contains(&q)
            })
            .collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    pub fn transactions_for_account<'a>(&self, document: &'a Document, account_id: Uuid) -> Vec<&'a Transaction> {
        let mut txs: Vec<&Transaction> = document
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        txs
    }

    /// Dashboard summary with the current month taken from `today`.
    pub fn summary(&self, document: &Document, today: NaiveDate) -> Result<LedgerSummary, CoreError> {
        Ok(LedgerSummary {
            as_of_date: today,
            total_balance: self.total_balance(document)?,
            current_month: self.monthly_totals(document, today.year(), today.month())?,
            account_count: document.accounts.len(),
            transaction_count: document.transactions.len(),
            goal_count: document.goals.len(),
            goals_reached: document.goals.iter().filter(|g| g.is_reached()).count(),
        })
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum that reports overflow instead of panicking. Account balances are
/// individually bounded but their total is not.
fn checked_sum(values: impl IntoIterator<Item = Decimal>, what: &str) -> Result<Decimal, CoreError> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| CoreError::AmountOverflow(format!("{what} exceeds the representable range")))
    })
}

fn validate_month(month: u32) -> Result<(), CoreError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "Month must be between 1 and 12, got {month}"
        )))
    }
}
