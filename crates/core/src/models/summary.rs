use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub year: i32,

    /// 1-based month number
    pub month: u32,

    /// Sum of income amounts booked in the month
    pub income: Decimal,

    /// Sum of expense amounts booked in the month (positive)
    pub expense: Decimal,
}

impl MonthlyTotals {
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        }
    }

    /// income - expense
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    /// `YYYY-MM` label used for chart axes.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Total expense spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: String,

    /// Display name from the taxonomy ("Unknown" for ids outside it)
    pub category_name: String,

    pub total: Decimal,
}

/// Dashboard view of the ledger at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Date the "current month" was taken from
    pub as_of_date: NaiveDate,

    /// Sum of all account balances
    pub total_balance: Decimal,

    /// Totals for the month containing `as_of_date`
    pub current_month: MonthlyTotals,

    pub account_count: usize,
    pub transaction_count: usize,
    pub goal_count: usize,

    /// Goals whose current amount has reached the target
    pub goals_reached: usize,
}
