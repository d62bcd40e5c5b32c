use rust_decimal::Decimal;

use super::{
    compare_budgets, month_totals, monthly_spending_by_category, percent_of, BudgetOverview,
    BudgetStatus, CategorySpending, MonthlyTotals,
};
use crate::format::{format_currency, format_percent};
use crate::models::{Budget, Transaction, YearMonth};

/// Month-over-month change (in percent) that is worth mentioning.
const TREND_THRESHOLD: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const LOW_SAVINGS_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
const GOOD_SAVINGS_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which rule produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    TopCategory,
    OverBudget,
    NearBudget,
    SpendingTrend,
    SavingsRate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, severity: Severity, title: &str, message: String) -> Self {
        Self {
            kind,
            severity,
            title: title.to_string(),
            message,
        }
    }
}

/// Aggregates every rule looks at, computed once per evaluation.
#[derive(Debug, Clone)]
pub struct InsightContext {
    pub spending: CategorySpending,
    pub budgets: BudgetOverview,
    pub current: MonthlyTotals,
    pub previous: MonthlyTotals,
}

impl InsightContext {
    pub fn build(transactions: &[Transaction], budgets: &[Budget], month: YearMonth) -> Self {
        let spending = monthly_spending_by_category(transactions, month);
        let budgets = compare_budgets(budgets, &spending, month);
        Self {
            current: month_totals(transactions, month),
            previous: month_totals(transactions, month.previous()),
            spending,
            budgets,
        }
    }
}

type Rule = fn(&InsightContext) -> Option<Insight>;

/// Evaluation order is fixed; each rule contributes at most one insight.
const RULES: &[Rule] = &[
    top_category,
    over_budget,
    near_budget,
    spending_trend,
    savings_rate,
];

/// Derive insights for `month`, with the preceding calendar month as the trend baseline.
/// An empty result means there is not enough data to say anything.
pub fn generate_insights(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: YearMonth,
) -> Vec<Insight> {
    evaluate(&InsightContext::build(transactions, budgets, month))
}

pub fn evaluate(ctx: &InsightContext) -> Vec<Insight> {
    RULES.iter().filter_map(|rule| rule(ctx)).collect()
}

fn top_category(ctx: &InsightContext) -> Option<Insight> {
    let (category, amount) = ctx.spending.top()?;
    Some(Insight::new(
        InsightKind::TopCategory,
        Severity::Info,
        "Top Spending Category",
        format!(
            "You've spent {} on {category} this month.",
            format_currency(amount)
        ),
    ))
}

fn over_budget(ctx: &InsightContext) -> Option<Insight> {
    let names = categories_with(ctx, BudgetStatus::Over);
    if names.is_empty() {
        return None;
    }
    let noun = if names.len() == 1 {
        "category"
    } else {
        "categories"
    };
    Some(Insight::new(
        InsightKind::OverBudget,
        Severity::Warning,
        "Budget Exceeded",
        format!(
            "You're over budget in {} {noun}: {}.",
            names.len(),
            names.join(", ")
        ),
    ))
}

fn near_budget(ctx: &InsightContext) -> Option<Insight> {
    let names = categories_with(ctx, BudgetStatus::Warning);
    if names.is_empty() {
        return None;
    }
    Some(Insight::new(
        InsightKind::NearBudget,
        Severity::Warning,
        "Approaching Budget Limit",
        format!(
            "You're close to your budget limit in {}.",
            names.join(", ")
        ),
    ))
}

fn spending_trend(ctx: &InsightContext) -> Option<Insight> {
    let prior = ctx.previous.expenses;
    if prior <= Decimal::ZERO {
        return None;
    }
    let change = percent_of(ctx.current.expenses.checked_sub(prior)?, prior)?;
    if change.abs() <= TREND_THRESHOLD {
        return None;
    }

    let (severity, direction) = if change > Decimal::ZERO {
        (Severity::Warning, "Increased")
    } else {
        (Severity::Success, "Decreased")
    };
    Some(Insight::new(
        InsightKind::SpendingTrend,
        severity,
        &format!("Spending {direction}"),
        format!(
            "Your spending has {} by {}% compared to last month.",
            direction.to_lowercase(),
            format_percent(change.abs())
        ),
    ))
}

fn savings_rate(ctx: &InsightContext) -> Option<Insight> {
    let income = ctx.current.income;
    if income <= Decimal::ZERO {
        return None;
    }
    let rate = percent_of(income.checked_sub(ctx.current.expenses)?, income)?;

    if rate < LOW_SAVINGS_RATE {
        Some(Insight::new(
            InsightKind::SavingsRate,
            Severity::Warning,
            "Low Savings Rate",
            format!(
                "You're saving only {}% of your income. Consider increasing your savings rate to at least 20%.",
                format_percent(rate)
            ),
        ))
    } else if rate >= GOOD_SAVINGS_RATE {
        Some(Insight::new(
            InsightKind::SavingsRate,
            Severity::Success,
            "Great Savings Rate",
            format!(
                "Excellent! You're saving {}% of your income this month.",
                format_percent(rate)
            ),
        ))
    } else {
        None
    }
}

fn categories_with(ctx: &InsightContext, status: BudgetStatus) -> Vec<&str> {
    ctx.budgets
        .with_status(status)
        .map(|p| p.budget.category.as_str())
        .collect()
}
