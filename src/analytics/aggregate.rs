use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::saturating_sum;
use crate::models::{Transaction, TransactionKind, YearMonth};

/// Months covered by the dashboard trend when nothing else is asked for.
pub const DEFAULT_WINDOW_MONTHS: u32 = 6;

/// Longest window `monthly_series` will build (a century).
pub const MAX_WINDOW_MONTHS: u32 = 1200;

/// Income, expenses and net for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

impl MonthlyTotals {
    fn empty(month: YearMonth) -> Self {
        Self {
            month,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            net: Decimal::ZERO,
        }
    }

    fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Income => self.income = self.income.saturating_add(txn.amount),
            TransactionKind::Expense => self.expenses = self.expenses.saturating_add(txn.amount),
        }
        self.net = self.income.saturating_sub(self.expenses);
    }
}

/// One entry per month in the closed window ending at `window_end`, oldest first.
/// Months without transactions are present with zero totals. Windows longer
/// than [`MAX_WINDOW_MONTHS`] are cut to that length.
pub fn monthly_series(
    transactions: &[Transaction],
    window_end: YearMonth,
    window_size: u32,
) -> Vec<MonthlyTotals> {
    if window_size == 0 {
        return Vec::new();
    }
    let size = window_size.min(MAX_WINDOW_MONTHS) as i32;
    let start = window_end.offset(1 - size);
    let mut buckets: Vec<MonthlyTotals> = (0..size)
        .map(|i| MonthlyTotals::empty(start.offset(i)))
        .collect();

    for txn in transactions {
        let slot = start.months_until(txn.month());
        if let Some(bucket) = usize::try_from(slot).ok().and_then(|i| buckets.get_mut(i)) {
            bucket.add(txn);
        }
    }

    buckets
}

/// Totals for a single month.
pub fn month_totals(transactions: &[Transaction], month: YearMonth) -> MonthlyTotals {
    let mut totals = MonthlyTotals::empty(month);
    for txn in transactions.iter().filter(|t| month.contains(t.date)) {
        totals.add(txn);
    }
    totals
}

/// Income, expenses and net over a whole transaction set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub count: usize,
}

pub fn period_totals(transactions: &[Transaction]) -> PeriodTotals {
    let mut totals = PeriodTotals::default();
    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => totals.income = totals.income.saturating_add(txn.amount),
            TransactionKind::Expense => {
                totals.expenses = totals.expenses.saturating_add(txn.amount)
            }
        }
        totals.count += 1;
    }
    totals.net = totals.income.saturating_sub(totals.expenses);
    totals
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Expense totals per category, largest first. Ties are ordered by category name.
/// Income never appears here.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let total = by_category.entry(txn.category.as_str()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(txn.amount);
    }

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    // stable sort keeps the name order for equal amounts
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// Expense amount per category for one month.
///
/// Only categories with at least one matching expense are present; use
/// [`CategorySpending::spent`] for a zero-defaulting lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySpending {
    totals: BTreeMap<String, Decimal>,
}

impl CategorySpending {
    /// Amount spent in `category`, zero when nothing was recorded.
    pub fn spent(&self, category: &str) -> Decimal {
        self.get(category).unwrap_or(Decimal::ZERO)
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.totals.get(category).copied()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.totals.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Entries in category-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.totals.values().copied())
    }

    /// Highest-spending category. On a tie the first in name order wins.
    pub fn top(&self) -> Option<(&str, Decimal)> {
        self.iter().fold(None, |best, (category, amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((category, amount)),
        })
    }

    fn record(&mut self, category: &str, amount: Decimal) {
        let total = self
            .totals
            .entry(category.to_string())
            .or_insert(Decimal::ZERO);
        *total = total.saturating_add(amount);
    }
}

pub fn monthly_spending_by_category(
    transactions: &[Transaction],
    month: YearMonth,
) -> CategorySpending {
    let mut spending = CategorySpending::default();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
    {
        spending.record(&txn.category, txn.amount);
    }
    spending
}
