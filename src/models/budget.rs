use rust_decimal::Decimal;

use super::YearMonth;

/// A validated budget that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub month: YearMonth,
}

/// Monthly spending cap for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    pub month: YearMonth,
    pub created_at: String,
}

impl Budget {
    pub fn from_new(id: i64, new: NewBudget, created_at: String) -> Self {
        Self {
            id,
            category: new.category,
            amount: new.amount,
            month: new.month,
            created_at,
        }
    }

    /// True when this budget occupies the same (category, month) slot.
    pub fn same_slot(&self, category: &str, month: YearMonth) -> bool {
        self.category == category && self.month == month
    }

    pub fn apply(&mut self, patch: &BudgetPatch) {
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(month) = patch.month {
            self.month = month;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub month: Option<YearMonth>,
}

impl BudgetPatch {
    pub fn replace_with(new: NewBudget) -> Self {
        Self {
            category: Some(new.category),
            amount: Some(new.amount),
            month: Some(new.month),
        }
    }
}
