#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn groceries() -> NewTransaction {
    NewTransaction {
        amount: dec!(1234.56),
        date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        description: "Weekly groceries".into(),
        kind: TransactionKind::Expense,
        category: "Groceries".into(),
    }
}

fn rent_budget() -> NewBudget {
    NewBudget {
        category: "Rent/EMI".into(),
        amount: dec!(15000),
        month: YearMonth::parse("2024-02").unwrap(),
    }
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_current() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_does_not_reapply_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.add_transaction(groceries());
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
    assert_eq!(db.list_transactions().len(), 1);
}

// ── Persistence ───────────────────────────────────────────────

#[test]
fn test_values_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.db");
    let (txn, budget) = {
        let mut db = Database::open(&path).unwrap();
        (db.add_transaction(groceries()), db.add_budget(rent_budget()))
    };

    let db = Database::open(&path).unwrap();
    assert_eq!(db.list_transactions(), vec![txn]);
    assert_eq!(db.list_budgets(), vec![budget]);
}

#[test]
fn test_ids_never_reused_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budget.db");
    let first = {
        let mut db = Database::open(&path).unwrap();
        let txn = db.add_transaction(groceries());
        db.delete_transaction(txn.id);
        txn.id
    };

    let mut db = Database::open(&path).unwrap();
    let next = db.add_transaction(groceries());
    assert!(next.id > first);
}

#[test]
fn test_sequence_is_shared() {
    let mut db = Database::open_in_memory().unwrap();
    let a = db.try_next_id().unwrap();
    let b = db.add_budget(rent_budget()).id;
    let c = db.try_next_id().unwrap();
    assert_eq!(b, a + 1);
    assert_eq!(c, b + 1);
}

#[test]
fn test_unique_budget_slot_enforced_by_schema() {
    let db = Database::open_in_memory().unwrap();
    let insert = "INSERT INTO budgets (id, category, month, amount, created_at)
                  VALUES (?1, 'Fuel', '2024-01', '100', '')";
    db.conn.execute(insert, params![1]).unwrap();
    assert!(db.conn.execute(insert, params![2]).is_err());
}

// ── Failure handling ──────────────────────────────────────────

#[test]
fn test_corrupt_row_fails_whole_read() {
    let mut db = Database::open_in_memory().unwrap();
    db.add_transaction(groceries());
    db.conn
        .execute(
            "INSERT INTO transactions (id, amount, date, description, kind, category, created_at)
             VALUES (99, 'lots', '2024-01-01', 'bad', 'expense', 'Other', '')",
            [],
        )
        .unwrap();

    assert!(db.try_list_transactions().is_err());
    assert!(db.list_transactions().is_empty());
}

#[test]
fn test_unknown_kind_is_corrupt() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (id, amount, date, description, kind, category, created_at)
             VALUES (1, '10', '2024-01-01', 'odd', 'transfer', 'Other', '')",
            [],
        )
        .unwrap();
    assert!(db.try_get_transaction(1).is_err());
    assert!(db.transaction(1).is_none());
}

#[test]
fn test_write_failure_still_returns_record() {
    let mut db = Database::open_in_memory().unwrap();
    db.conn.execute_batch("DROP TABLE budgets;").unwrap();

    let budget = db.add_budget(rent_budget());
    assert_eq!(budget.amount, dec!(15000));
    assert!(budget.id > 0);
    assert!(db.list_budgets().is_empty());
    assert!(!db.delete_budget(budget.id));
}

#[test]
fn test_ids_keep_rising_without_sequence_table() {
    let mut db = Database::open_in_memory().unwrap();
    let before = db.add_transaction(groceries()).id;
    db.conn.execute_batch("DROP TABLE id_sequence;").unwrap();

    let after = db.add_transaction(groceries()).id;
    assert_eq!(after, before + 1);
    assert_eq!(db.list_transactions().len(), 2);
}

#[test]
fn test_update_budget_missing_row_keeps_slot_holder() {
    let mut db = Database::open_in_memory().unwrap();
    let kept = db.add_budget(rent_budget());
    let ghost = Budget::from_new(500, rent_budget(), String::new());
    assert!(!db.try_update_budget(&ghost).unwrap());
    assert_eq!(db.list_budgets(), vec![kept]);
}

#[test]
fn test_budget_write_errors_name_the_budget() {
    let mut db = Database::open_in_memory().unwrap();
    let saved = db.add_budget(rent_budget());
    db.conn
        .execute_batch(
            "CREATE TRIGGER no_insert BEFORE INSERT ON budgets
               BEGIN SELECT RAISE(ABORT, 'budgets are frozen'); END;
             CREATE TRIGGER no_update BEFORE UPDATE ON budgets
               BEGIN SELECT RAISE(ABORT, 'budgets are frozen'); END;",
        )
        .unwrap();

    let fresh = Budget::from_new(900, rent_budget(), String::new());
    let err = db.try_upsert_budget(&fresh).unwrap_err();
    assert!(err.to_string().contains("Failed to insert budget 900"), "{err:#}");
    assert!(format!("{err:#}").contains("budgets are frozen"));
    // the failed insert rolled back the delete too
    assert_eq!(db.list_budgets(), vec![saved.clone()]);

    let err = db.try_update_budget(&saved).unwrap_err();
    assert!(
        err.to_string()
            .contains(&format!("Failed to update budget {}", saved.id)),
        "{err:#}"
    );

    db.conn.execute_batch("DROP TABLE budgets;").unwrap();
    let err = db.try_upsert_budget(&fresh).unwrap_err();
    assert!(
        err.to_string()
            .contains("Failed to clear Rent/EMI 2024-02 before saving budget 900"),
        "{err:#}"
    );
}
