//! Pure aggregation over transaction and budget snapshots.
//!
//! Nothing in here touches storage or the clock: callers pass the records and
//! the reference month explicitly.

mod aggregate;
mod compare;
mod insights;

use rust_decimal::Decimal;

pub use aggregate::{
    category_totals, month_totals, monthly_series, monthly_spending_by_category, period_totals,
    CategorySpending, CategoryTotal, MonthlyTotals, PeriodTotals, DEFAULT_WINDOW_MONTHS,
    MAX_WINDOW_MONTHS,
};
pub use compare::{compare_budgets, BudgetOverview, BudgetProgress, BudgetStatus, WARNING_THRESHOLD};
pub use insights::{evaluate, generate_insights, Insight, InsightContext, InsightKind, Severity};

/// `part` as a percentage of `whole`. `None` for a zero `whole` or a ratio
/// too large for `Decimal`.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// Sum that pins at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub(crate) fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}
