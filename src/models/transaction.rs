use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "exp" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn all() -> &'static [TransactionKind] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    pub category: String,
    /// RFC 3339, set once when the record is created.
    pub created_at: String,
}

impl Transaction {
    pub fn from_new(id: i64, new: NewTransaction, created_at: String) -> Self {
        Self {
            id,
            amount: new.amount,
            date: new.date,
            description: new.description,
            kind: new.kind,
            category: new.category,
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    /// Replace every field the patch carries. `id` and `created_at` never change.
    pub fn apply(&mut self, patch: &TransactionPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

impl TransactionPatch {
    /// A patch that overwrites every mutable field with `new`'s values.
    pub fn replace_with(new: NewTransaction) -> Self {
        Self {
            amount: Some(new.amount),
            date: Some(new.date),
            description: Some(new.description),
            kind: Some(new.kind),
            category: Some(new.category),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
