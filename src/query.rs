use std::cmp::Ordering;

use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Newest first.
    #[default]
    Date,
    /// Largest first.
    Amount,
    Category,
    Description,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Description => "description",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            "category" => Some(Self::Category),
            "description" | "desc" => Some(Self::Description),
            _ => None,
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            Self::Date => b.date.cmp(&a.date),
            Self::Amount => b.amount.cmp(&a.amount),
            Self::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
            Self::Description => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filters and ordering for the transaction history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Case-insensitive substring of the description or category.
    pub search: Option<String>,
    pub kind: Option<TransactionKind>,
    /// Exact category name, case-insensitive.
    pub category: Option<String>,
    pub sort: SortBy,
}

impl TransactionQuery {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !txn.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                txn.description.to_lowercase().contains(&needle)
                    || txn.category.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Matching transactions in the requested order. Equal keys keep their input order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut matched: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}
