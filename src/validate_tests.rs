#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::validate::*;
use crate::models::{TransactionKind, YearMonth};

fn lunch_form() -> TransactionForm {
    TransactionForm {
        amount: "250.50".into(),
        date: "2024-01-10".into(),
        description: "  Lunch with team ".into(),
        kind: "expense".into(),
        category: "food & dining".into(),
    }
}

fn budget_form() -> BudgetForm {
    BudgetForm {
        category: "Groceries".into(),
        amount: "5000".into(),
        month: "2024-01".into(),
    }
}

// ── validate_transaction ──────────────────────────────────────

#[test]
fn test_valid_transaction() {
    let txn = validate_transaction(&lunch_form()).unwrap();
    assert_eq!(txn.amount, dec!(250.5));
    assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    assert_eq!(txn.description, "Lunch with team");
    assert_eq!(txn.kind, TransactionKind::Expense);
    assert_eq!(txn.category, "Food & Dining");
}

#[test]
fn test_rejects_non_positive_amount() {
    for amount in ["0", "-5", "", "abc", "  "] {
        let form = TransactionForm {
            amount: amount.into(),
            ..lunch_form()
        };
        let errors = validate_transaction(&form).unwrap_err();
        assert_eq!(errors.0, vec![FieldError::InvalidAmount], "{amount:?}");
    }
}

#[test]
fn test_amount_message() {
    assert_eq!(
        FieldError::InvalidAmount.to_string(),
        "Please enter a valid amount greater than 0"
    );
}

#[test]
fn test_amount_precision_and_magnitude() {
    let cases = [
        ("0.001", FieldError::AmountTooPrecise),
        ("0.0000000000000000000001", FieldError::AmountTooPrecise),
        ("1000000000000000", FieldError::AmountTooLarge),
        ("50000000000000000000000000000", FieldError::AmountTooLarge),
    ];
    for (amount, expected) in cases {
        let form = BudgetForm {
            amount: amount.into(),
            ..budget_form()
        };
        let errors = validate_budget(&form).unwrap_err();
        assert_eq!(errors.0, vec![expected], "{amount:?}");
        assert!(errors.for_field("amount").is_some());
    }
}

#[test]
fn test_amount_bounds_inclusive() {
    for (amount, expected) in [
        ("0.01", dec!(0.01)),
        ("12.50", dec!(12.5)),
        ("999999999999999.99", dec!(999999999999999.99)),
    ] {
        let form = TransactionForm {
            amount: amount.into(),
            ..lunch_form()
        };
        assert_eq!(validate_transaction(&form).unwrap().amount, expected, "{amount:?}");
    }
}

#[test]
fn test_missing_and_invalid_date() {
    let form = TransactionForm {
        date: String::new(),
        ..lunch_form()
    };
    assert_eq!(
        validate_transaction(&form).unwrap_err().0,
        vec![FieldError::MissingDate]
    );

    let form = TransactionForm {
        date: "2024-02-30".into(),
        ..lunch_form()
    };
    assert_eq!(
        validate_transaction(&form).unwrap_err().0,
        vec![FieldError::InvalidDate("2024-02-30".into())]
    );
}

#[test]
fn test_blank_description() {
    let form = TransactionForm {
        description: "   ".into(),
        ..lunch_form()
    };
    let errors = validate_transaction(&form).unwrap_err();
    assert_eq!(errors.0, vec![FieldError::MissingDescription]);
    assert_eq!(errors.0[0].to_string(), "Please enter a description");
}

#[test]
fn test_description_length_limit() {
    let form = TransactionForm {
        description: "x".repeat(MAX_DESCRIPTION_CHARS),
        ..lunch_form()
    };
    assert!(validate_transaction(&form).is_ok());

    let form = TransactionForm {
        description: "x".repeat(MAX_DESCRIPTION_CHARS + 1),
        ..lunch_form()
    };
    assert_eq!(
        validate_transaction(&form).unwrap_err().0,
        vec![FieldError::DescriptionTooLong]
    );
}

#[test]
fn test_description_length_counts_chars() {
    // 100 multi-byte characters are still within the limit
    let form = TransactionForm {
        description: "₹".repeat(MAX_DESCRIPTION_CHARS),
        ..lunch_form()
    };
    assert!(validate_transaction(&form).is_ok());
}

#[test]
fn test_category_must_match_type() {
    let form = TransactionForm {
        category: "Salary".into(),
        ..lunch_form()
    };
    let errors = validate_transaction(&form).unwrap_err();
    assert_eq!(
        errors.0,
        vec![FieldError::UnknownCategory {
            kind: TransactionKind::Expense,
            category: "Salary".into(),
        }]
    );

    let form = TransactionForm {
        kind: "income".into(),
        category: "salary".into(),
        ..lunch_form()
    };
    let txn = validate_transaction(&form).unwrap();
    assert_eq!(txn.kind, TransactionKind::Income);
    assert_eq!(txn.category, "Salary");
}

#[test]
fn test_missing_category() {
    let form = TransactionForm {
        category: String::new(),
        ..lunch_form()
    };
    let errors = validate_transaction(&form).unwrap_err();
    assert_eq!(errors.0, vec![FieldError::MissingCategory]);
    assert_eq!(errors.0[0].to_string(), "Please select a category");
}

#[test]
fn test_invalid_type_skips_category_check() {
    let form = TransactionForm {
        kind: "transfer".into(),
        ..lunch_form()
    };
    assert_eq!(
        validate_transaction(&form).unwrap_err().0,
        vec![FieldError::InvalidKind]
    );
}

#[test]
fn test_collects_every_error() {
    let errors = validate_transaction(&TransactionForm::default()).unwrap_err();
    let fields: Vec<&str> = errors.0.iter().map(FieldError::field).collect();
    assert_eq!(fields, ["amount", "date", "description", "type"]);
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.for_field("date"), Some(&FieldError::MissingDate));
    assert!(errors.for_field("month").is_none());
    assert!(errors
        .to_string()
        .starts_with("amount: Please enter a valid amount greater than 0\n"));
}

#[test]
fn test_form_prefill_round_trips() {
    let new = validate_transaction(&lunch_form()).unwrap();
    let stored = crate::models::Transaction::from_new(7, new.clone(), String::new());
    let form = TransactionForm::from_transaction(&stored);
    assert_eq!(validate_transaction(&form).unwrap(), new);
}

// ── validate_budget ───────────────────────────────────────────

#[test]
fn test_valid_budget() {
    let budget = validate_budget(&budget_form()).unwrap();
    assert_eq!(budget.category, "Groceries");
    assert_eq!(budget.amount, dec!(5000));
    assert_eq!(budget.month, YearMonth::new(2024, 1).unwrap());
}

#[test]
fn test_budget_needs_expense_category() {
    let form = BudgetForm {
        category: "Bonus".into(),
        ..budget_form()
    };
    assert_eq!(
        validate_budget(&form).unwrap_err().0,
        vec![FieldError::UnknownCategory {
            kind: TransactionKind::Expense,
            category: "Bonus".into(),
        }]
    );
}

#[test]
fn test_budget_month() {
    let form = BudgetForm {
        month: String::new(),
        ..budget_form()
    };
    let errors = validate_budget(&form).unwrap_err();
    assert_eq!(errors.0, vec![FieldError::MissingMonth]);
    assert_eq!(errors.0[0].to_string(), "Please select a month");

    let form = BudgetForm {
        month: "2024-13".into(),
        ..budget_form()
    };
    assert_eq!(
        validate_budget(&form).unwrap_err().0,
        vec![FieldError::InvalidMonth("2024-13".into())]
    );
}

#[test]
fn test_budget_amount() {
    let form = BudgetForm {
        amount: "0".into(),
        ..budget_form()
    };
    assert_eq!(
        validate_budget(&form).unwrap_err().0,
        vec![FieldError::InvalidAmount]
    );
}

#[test]
fn test_empty_budget_form() {
    let errors = validate_budget(&BudgetForm::default()).unwrap_err();
    let fields: Vec<&str> = errors.0.iter().map(FieldError::field).collect();
    assert_eq!(fields, ["category", "amount", "month"]);
}
