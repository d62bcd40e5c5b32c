use rust_decimal::Decimal;

use super::{percent_of, saturating_sum, CategorySpending};
use crate::models::{Budget, YearMonth};

/// Share of a budget (in percent) at which it starts to warn.
pub const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }

    /// Classify a spent percentage: 100 and above is over, 80 and above warns.
    pub fn classify(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            Self::Over
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One budget measured against the month's spending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetProgress {
    pub budget: Budget,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

impl BudgetProgress {
    pub fn measure(budget: &Budget, spending: &CategorySpending) -> Self {
        let spent = spending.spent(&budget.category);
        let ratio = if budget.amount > Decimal::ZERO {
            percent_of(spent, budget.amount)
        } else {
            None
        };
        let (percentage, status) = match ratio {
            Some(percentage) => (percentage, BudgetStatus::classify(percentage)),
            // zero cap, or a cap so small the ratio overflows: any spending exceeds it
            None if spent > Decimal::ZERO => (Decimal::ZERO, BudgetStatus::Over),
            None => (Decimal::ZERO, BudgetStatus::Ok),
        };

        Self {
            budget: budget.clone(),
            spent,
            remaining: budget.amount.saturating_sub(spent),
            percentage,
            status,
        }
    }
}

/// Every budget of a month plus the month-wide aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetOverview {
    pub month: YearMonth,
    pub items: Vec<BudgetProgress>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub overall_percentage: Decimal,
}

impl BudgetOverview {
    pub fn with_status(&self, status: BudgetStatus) -> impl Iterator<Item = &BudgetProgress> {
        self.items.iter().filter(move |p| p.status == status)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Compare the budgets set for `month` with that month's category spending.
/// Budgets for other months are ignored.
pub fn compare_budgets(
    budgets: &[Budget],
    spending: &CategorySpending,
    month: YearMonth,
) -> BudgetOverview {
    let items: Vec<BudgetProgress> = budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|b| BudgetProgress::measure(b, spending))
        .collect();

    let total_budget = saturating_sum(items.iter().map(|p| p.budget.amount));
    let total_spent = saturating_sum(items.iter().map(|p| p.spent));
    let overall_percentage = if total_budget > Decimal::ZERO {
        percent_of(total_spent, total_budget).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    BudgetOverview {
        month,
        items,
        total_budget,
        total_spent,
        remaining: total_budget.saturating_sub(total_spent),
        overall_percentage,
    }
}
