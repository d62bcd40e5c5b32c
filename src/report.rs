//! Plain-text renderings of the analytics outputs.

use rust_decimal::Decimal;

use crate::analytics::{
    category_totals, monthly_spending_by_category, percent_of, saturating_sum, BudgetOverview,
    CategorySpending, CategoryTotal, Insight, MonthlyTotals, PeriodTotals,
};
use crate::format::{format_currency, format_date, format_month, format_percent, progress_bar, truncate};
use crate::models::{Budget, Transaction, TransactionKind, YearMonth};

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 10;

pub const NO_INSIGHTS: &str = "Add more transactions and budgets to get personalized insights.";

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Dashboard side panel figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickStats {
    pub total_transactions: usize,
    /// Budgets set for the reference month.
    pub active_budgets: usize,
    /// Expense categories with any spending, all time.
    pub categories_tracked: usize,
    pub month_expenses: Decimal,
}

impl QuickStats {
    pub fn compute(transactions: &[Transaction], budgets: &[Budget], month: YearMonth) -> Self {
        Self {
            total_transactions: transactions.len(),
            active_budgets: budgets.iter().filter(|b| b.month == month).count(),
            categories_tracked: category_totals(transactions).len(),
            month_expenses: monthly_spending_by_category(transactions, month).total(),
        }
    }
}

pub fn render_summary(
    totals: &MonthlyTotals,
    spending: &CategorySpending,
    stats: &QuickStats,
) -> String {
    let mut lines = vec![
        format_month(totals.month),
        rule(),
        format!("  Income:     {:>14}", format_currency(totals.income)),
        format!("  Expenses:   {:>14}", format_currency(totals.expenses)),
        format!("  Net:        {:>14}", format_currency(totals.net)),
    ];

    if !spending.is_empty() {
        let mut by_amount: Vec<(&str, Decimal)> = spending.iter().collect();
        by_amount.sort_by(|a, b| b.1.cmp(&a.1));

        lines.push(String::new());
        lines.push("Spending by Category:".into());
        for (category, amount) in by_amount {
            lines.push(format!(
                "  {:<22} {:>12}",
                truncate(category, 22),
                format_currency(amount)
            ));
        }
    }

    lines.push(String::new());
    lines.push("Quick Stats:".into());
    lines.push(format!("  Total Transactions   {}", stats.total_transactions));
    lines.push(format!("  Active Budgets       {}", stats.active_budgets));
    lines.push(format!("  Categories Tracked   {}", stats.categories_tracked));
    lines.push(format!(
        "  This Month Expenses  {}",
        format_currency(stats.month_expenses)
    ));

    lines.join("\n")
}

pub fn render_budgets(overview: &BudgetOverview) -> String {
    let title = format!("Budgets for {}", format_month(overview.month));
    if overview.is_empty() {
        return format!("{title}\nNo budgets set for this month");
    }

    let mut lines = vec![
        title,
        rule(),
        format!(
            "  {:<4} {:<18} {:>10} {:>10} {:>10} {:>7}  {:<8}",
            "ID", "Category", "Budget", "Spent", "Remaining", "Used", "Status"
        ),
    ];
    for item in &overview.items {
        lines.push(format!(
            "  {:<4} {:<18} {:>10} {:>10} {:>10} {:>6}%  {:<8}{}",
            item.budget.id,
            truncate(&item.budget.category, 18),
            format_currency(item.budget.amount),
            format_currency(item.spent),
            format_currency(item.remaining),
            format_percent(item.percentage),
            item.status.as_str(),
            progress_bar(item.percentage, BAR_WIDTH),
        ));
    }
    lines.push(rule());
    lines.push(format!(
        "  {:<4} {:<18} {:>10} {:>10} {:>10} {:>6}%",
        "",
        "Total",
        format_currency(overview.total_budget),
        format_currency(overview.total_spent),
        format_currency(overview.remaining),
        format_percent(overview.overall_percentage),
    ));
    lines.join("\n")
}

pub fn render_trend(series: &[MonthlyTotals]) -> String {
    let mut lines = vec![
        format!(
            "  {:<10} {:>12} {:>12} {:>12}",
            "Month", "Income", "Expenses", "Net"
        ),
        rule(),
    ];
    for m in series {
        lines.push(format!(
            "  {:<10} {:>12} {:>12} {:>12}",
            m.month.short_label(),
            format_currency(m.income),
            format_currency(m.expenses),
            format_currency(m.net),
        ));
    }
    lines.join("\n")
}

/// All-time expense totals with each category's share of total spending.
pub fn render_categories(totals: &[CategoryTotal]) -> String {
    if totals.is_empty() {
        return "No expenses recorded".into();
    }
    let grand_total = saturating_sum(totals.iter().map(|t| t.amount));

    let mut lines = vec![
        format!("  {:<22} {:>12} {:>7}", "Category", "Spent", "Share"),
        rule(),
    ];
    for total in totals {
        let share = percent_of(total.amount, grand_total).unwrap_or(Decimal::ZERO);
        lines.push(format!(
            "  {:<22} {:>12} {:>6}%",
            truncate(&total.category, 22),
            format_currency(total.amount),
            format_percent(share),
        ));
    }
    lines.join("\n")
}

pub fn render_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return NO_INSIGHTS.into();
    }
    insights
        .iter()
        .map(|i| format!("[{}] {}\n  {}", i.severity, i.title, i.message))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Signed amount as shown in the history: income positive, expenses negative.
fn signed_amount(txn: &Transaction) -> String {
    match txn.kind {
        TransactionKind::Income => format!("+{}", format_currency(txn.amount)),
        TransactionKind::Expense => format!("-{}", format_currency(txn.amount)),
    }
}

pub fn render_transactions(transactions: &[Transaction], totals: &PeriodTotals) -> String {
    if transactions.is_empty() {
        return "No transactions found".into();
    }

    let mut lines = vec![
        format!(
            "  {:<5} {:<13} {:<8} {:<18} {:>12}  Description",
            "ID", "Date", "Type", "Category", "Amount"
        ),
        rule(),
    ];
    for txn in transactions {
        lines.push(format!(
            "  {:<5} {:<13} {:<8} {:<18} {:>12}  {}",
            txn.id,
            format_date(txn.date),
            txn.kind.label(),
            truncate(&txn.category, 18),
            signed_amount(txn),
            truncate(&txn.description, 40),
        ));
    }
    lines.push(rule());
    lines.push(format!(
        "  {} transactions   Income {}   Expenses {}   Net {}",
        totals.count,
        format_currency(totals.income),
        format_currency(totals.expenses),
        format_currency(totals.net),
    ));
    lines.join("\n")
}
