use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings goal. Progress is maintained by hand, it is not derived from
/// transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub id: Uuid,
    pub name: String,

    /// Must be positive
    pub target_amount: Decimal,

    /// Non-negative, may exceed the target
    #[serde(default)]
    pub current_amount: Decimal,

    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub icon: String,
}

impl SavingGoal {
    pub fn new(name: impl Into<String>, target_amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount: Decimal::ZERO,
            deadline: None,
            icon: "💰".to_string(),
        }
    }

    pub fn with_current(mut self, current_amount: Decimal) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Progress in percent, clamped to `0..=100`. A non-positive target
    /// reports 0.
    pub fn progress_pct(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO || self.current_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        if self.current_amount >= self.target_amount {
            return Decimal::ONE_HUNDRED;
        }
        // Ratio is below 1 here, so scaling by 100 cannot overflow.
        (self.current_amount / self.target_amount) * Decimal::ONE_HUNDRED
    }

    pub fn is_reached(&self) -> bool {
        self.target_amount > Decimal::ZERO && self.current_amount >= self.target_amount
    }
}
