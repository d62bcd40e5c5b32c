//! Turns raw form input into records the store accepts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{
    find_category, Budget, NewBudget, NewTransaction, Transaction, TransactionKind, YearMonth,
};

pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Amounts are whole paise at most.
pub const MAX_AMOUNT_DECIMALS: u32 = 2;

/// Exclusive upper bound on a single amount (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2764472320, 232830, 0, false, 0);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter a valid amount greater than 0")]
    InvalidAmount,

    #[error("Amount can have at most 2 decimal places")]
    AmountTooPrecise,

    #[error("Amount must be less than 1,000,000,000,000,000")]
    AmountTooLarge,

    #[error("Please select a date")]
    MissingDate,

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Please enter a description")]
    MissingDescription,

    #[error("Description must be less than 100 characters")]
    DescriptionTooLong,

    #[error("Please select a type (income or expense)")]
    InvalidKind,

    #[error("Please select a category")]
    MissingCategory,

    #[error("Unknown {kind} category: {category}")]
    UnknownCategory {
        kind: TransactionKind,
        category: String,
    },

    #[error("Please select a month")]
    MissingMonth,

    #[error("Invalid month: {0} (expected YYYY-MM)")]
    InvalidMonth(String),
}

impl FieldError {
    /// Name of the form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidAmount | Self::AmountTooPrecise | Self::AmountTooLarge => "amount",
            Self::MissingDate | Self::InvalidDate(_) => "date",
            Self::MissingDescription | Self::DescriptionTooLong => "description",
            Self::InvalidKind => "type",
            Self::MissingCategory | Self::UnknownCategory { .. } => "category",
            Self::MissingMonth | Self::InvalidMonth(_) => "month",
        }
    }
}

/// Every problem found in one form, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One "field: message" line per error.
fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|err| format!("{}: {err}", err.field()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw transaction input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub category: String,
}

impl TransactionForm {
    /// Prefill from a stored transaction, for editing.
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            amount: txn.amount.to_string(),
            date: txn.date.to_string(),
            description: txn.description.clone(),
            kind: txn.kind.as_str().to_string(),
            category: txn.category.clone(),
        }
    }
}

/// Raw budget input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetForm {
    pub category: String,
    pub amount: String,
    pub month: String,
}

impl BudgetForm {
    pub fn from_budget(budget: &Budget) -> Self {
        Self {
            category: budget.category.clone(),
            amount: budget.amount.to_string(),
            month: budget.month.to_string(),
        }
    }
}

pub fn validate_transaction(form: &TransactionForm) -> Result<NewTransaction, ValidationErrors> {
    let mut errors = Vec::new();

    let amount = check(parse_amount(&form.amount), &mut errors);

    let date = check(
        match form.date.trim() {
            "" => Err(FieldError::MissingDate),
            raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| FieldError::InvalidDate(raw.to_string())),
        },
        &mut errors,
    );

    let description = form.description.trim();
    let description = check(
        if description.is_empty() {
            Err(FieldError::MissingDescription)
        } else if description.chars().count() > MAX_DESCRIPTION_CHARS {
            Err(FieldError::DescriptionTooLong)
        } else {
            Ok(description.to_string())
        },
        &mut errors,
    );

    let kind = check(
        TransactionKind::parse(&form.kind).ok_or(FieldError::InvalidKind),
        &mut errors,
    );

    // the category list depends on the type, so an invalid type leaves nothing to check against
    let category = kind.and_then(|kind| check(parse_category(kind, &form.category), &mut errors));

    match (amount, date, description, kind, category) {
        (Some(amount), Some(date), Some(description), Some(kind), Some(category))
            if errors.is_empty() =>
        {
            Ok(NewTransaction {
                amount,
                date,
                description,
                kind,
                category,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Budgets are caps on spending, so only expense categories are accepted.
pub fn validate_budget(form: &BudgetForm) -> Result<NewBudget, ValidationErrors> {
    let mut errors = Vec::new();

    let category = check(
        parse_category(TransactionKind::Expense, &form.category),
        &mut errors,
    );
    let amount = check(parse_amount(&form.amount), &mut errors);
    let month = check(
        match form.month.trim() {
            "" => Err(FieldError::MissingMonth),
            raw => YearMonth::parse(raw).ok_or_else(|| FieldError::InvalidMonth(raw.to_string())),
        },
        &mut errors,
    );

    match (category, amount, month) {
        (Some(category), Some(amount), Some(month)) if errors.is_empty() => Ok(NewBudget {
            category,
            amount,
            month,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn check<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// Positive, at most [`MAX_AMOUNT_DECIMALS`] places, below [`MAX_AMOUNT`].
fn parse_amount(raw: &str) -> Result<Decimal, FieldError> {
    let amount = match Decimal::from_str(raw.trim()) {
        Ok(amount) if amount > Decimal::ZERO => amount.normalize(),
        _ => return Err(FieldError::InvalidAmount),
    };
    if amount.scale() > MAX_AMOUNT_DECIMALS {
        Err(FieldError::AmountTooPrecise)
    } else if amount >= MAX_AMOUNT {
        Err(FieldError::AmountTooLarge)
    } else {
        Ok(amount)
    }
}

fn parse_category(kind: TransactionKind, raw: &str) -> Result<String, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::MissingCategory);
    }
    find_category(kind, raw)
        .map(str::to_string)
        .ok_or_else(|| FieldError::UnknownCategory {
            kind,
            category: raw.to_string(),
        })
}
