mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::models::*;
use crate::store::{timestamp, RecordStore};

const TRANSACTION_COLUMNS: &str = "id, amount, date, description, kind, category, created_at";
const BUDGET_COLUMNS: &str = "id, category, month, amount, created_at";

/// SQLite-backed record store.
///
/// The `try_*` methods report every failure; the [`RecordStore`] impl on top
/// of them logs and swallows failures so callers always get a usable value.
pub struct Database {
    conn: Connection,
    /// Highest id handed out by this handle, used when the sequence table is unavailable.
    last_id: i64,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn, last_id: 0 };
        db.migrate().context("Database migration failed")?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn, last_id: 0 };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    pub fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    // ── Identifiers ───────────────────────────────────────────

    /// Advance the persistent sequence. Ids are shared by both collections
    /// and never handed out twice, even after the record is deleted.
    pub fn try_next_id(&mut self) -> Result<i64> {
        let id: i64 = self
            .conn
            .query_row(
                "UPDATE id_sequence SET last_id = MAX(last_id, ?1) + 1 RETURNING last_id",
                params![self.last_id],
                |row| row.get(0),
            )
            .context("Failed to advance id sequence")?;
        self.last_id = id;
        Ok(id)
    }

    fn issue_id(&mut self) -> i64 {
        match self.try_next_id() {
            Ok(id) => id,
            Err(e) => {
                warn!("{e:#}; using an in-process id");
                self.last_id += 1;
                self.last_id
            }
        }
    }

    // ── Transactions ──────────────────────────────────────────

    pub fn try_list_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY id"
        ))?;
        let rows = stmt.query_map([], transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn try_get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"),
                params![id],
                transaction_from_row,
            )
            .optional()?)
    }

    pub fn try_insert_transaction(&self, txn: &Transaction) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO transactions (id, amount, date, description, kind, category, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    txn.id,
                    txn.amount.to_string(),
                    txn.date.to_string(),
                    txn.description,
                    txn.kind.as_str(),
                    txn.category,
                    txn.created_at,
                ],
            )
            .with_context(|| format!("Failed to insert transaction {}", txn.id))?;
        Ok(())
    }

    /// Overwrite the mutable columns. Returns false when no row has this id.
    pub fn try_update_transaction(&self, txn: &Transaction) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE transactions
                 SET amount = ?1, date = ?2, description = ?3, kind = ?4, category = ?5
                 WHERE id = ?6",
                params![
                    txn.amount.to_string(),
                    txn.date.to_string(),
                    txn.description,
                    txn.kind.as_str(),
                    txn.category,
                    txn.id,
                ],
            )
            .with_context(|| format!("Failed to update transaction {}", txn.id))?;
        Ok(changed > 0)
    }

    pub fn try_delete_transaction(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete transaction {id}"))?;
        Ok(changed > 0)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub fn try_list_budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BUDGET_COLUMNS} FROM budgets ORDER BY id"))?;
        let rows = stmt.query_map([], budget_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn try_get_budget(&self, id: i64) -> Result<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE id = ?1"),
                params![id],
                budget_from_row,
            )
            .optional()?)
    }

    pub fn try_budget_for(&self, category: &str, month: YearMonth) -> Result<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE category = ?1 AND month = ?2"),
                params![category, month.to_string()],
                budget_from_row,
            )
            .optional()?)
    }

    /// Insert `budget`, first removing whatever occupies its (category, month) slot.
    pub fn try_upsert_budget(&mut self, budget: &Budget) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM budgets WHERE category = ?1 AND month = ?2",
            params![budget.category, budget.month.to_string()],
        )
        .with_context(|| {
            format!(
                "Failed to clear {} {} before saving budget {}",
                budget.category, budget.month, budget.id
            )
        })?;
        tx.execute(
            "INSERT INTO budgets (id, category, month, amount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                budget.id,
                budget.category,
                budget.month.to_string(),
                budget.amount.to_string(),
                budget.created_at,
            ],
        )
        .with_context(|| format!("Failed to insert budget {}", budget.id))?;
        tx.commit()
            .with_context(|| format!("Failed to save budget {}", budget.id))?;
        Ok(())
    }

    /// Overwrite the mutable columns. Another budget already holding the
    /// target (category, month) slot is removed. Returns false when no row has this id.
    pub fn try_update_budget(&mut self, budget: &Budget) -> Result<bool> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM budgets WHERE category = ?1 AND month = ?2 AND id != ?3",
            params![budget.category, budget.month.to_string(), budget.id],
        )
        .with_context(|| {
            format!(
                "Failed to clear {} {} before updating budget {}",
                budget.category, budget.month, budget.id
            )
        })?;
        let changed = tx.execute(
            "UPDATE budgets SET category = ?1, month = ?2, amount = ?3 WHERE id = ?4",
            params![
                budget.category,
                budget.month.to_string(),
                budget.amount.to_string(),
                budget.id,
            ],
        )
        .with_context(|| format!("Failed to update budget {}", budget.id))?;
        if changed == 0 {
            // leave the slot holder alone when there was nothing to move into it
            tx.rollback()?;
            return Ok(false);
        }
        tx.commit()
            .with_context(|| format!("Failed to update budget {}", budget.id))?;
        Ok(true)
    }

    pub fn try_delete_budget(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM budgets WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to delete budget {id}"))?;
        Ok(changed > 0)
    }
}

impl RecordStore for Database {
    fn list_transactions(&self) -> Vec<Transaction> {
        self.try_list_transactions().unwrap_or_else(|e| {
            warn!("failed to load transactions: {e:#}");
            Vec::new()
        })
    }

    fn transaction(&self, id: i64) -> Option<Transaction> {
        self.try_get_transaction(id).unwrap_or_else(|e| {
            warn!("failed to load transaction {id}: {e:#}");
            None
        })
    }

    fn add_transaction(&mut self, new: NewTransaction) -> Transaction {
        let txn = Transaction::from_new(self.issue_id(), new, timestamp());
        match self.try_insert_transaction(&txn) {
            Ok(()) => debug!(id = txn.id, "transaction added"),
            Err(e) => warn!("{e:#}"),
        }
        txn
    }

    fn update_transaction(&mut self, id: i64, patch: &TransactionPatch) -> Option<Transaction> {
        let mut txn = self.transaction(id)?;
        txn.apply(patch);
        match self.try_update_transaction(&txn) {
            Ok(true) => debug!(id, "transaction updated"),
            Ok(false) => return None,
            Err(e) => warn!("{e:#}"),
        }
        Some(txn)
    }

    fn delete_transaction(&mut self, id: i64) -> bool {
        self.try_delete_transaction(id).unwrap_or_else(|e| {
            warn!("{e:#}");
            false
        })
    }

    fn list_budgets(&self) -> Vec<Budget> {
        self.try_list_budgets().unwrap_or_else(|e| {
            warn!("failed to load budgets: {e:#}");
            Vec::new()
        })
    }

    fn budget(&self, id: i64) -> Option<Budget> {
        self.try_get_budget(id).unwrap_or_else(|e| {
            warn!("failed to load budget {id}: {e:#}");
            None
        })
    }

    fn budget_for(&self, category: &str, month: YearMonth) -> Option<Budget> {
        self.try_budget_for(category, month).unwrap_or_else(|e| {
            warn!("failed to look up budget for {category} in {month}: {e:#}");
            None
        })
    }

    fn add_budget(&mut self, new: NewBudget) -> Budget {
        let budget = Budget::from_new(self.issue_id(), new, timestamp());
        match self.try_upsert_budget(&budget) {
            Ok(()) => debug!(id = budget.id, "budget saved"),
            Err(e) => warn!("{e:#}"),
        }
        budget
    }

    fn update_budget(&mut self, id: i64, patch: &BudgetPatch) -> Option<Budget> {
        let mut budget = self.budget(id)?;
        budget.apply(patch);
        match self.try_update_budget(&budget) {
            Ok(true) => debug!(id, "budget updated"),
            Ok(false) => return None,
            Err(e) => warn!("{e:#}"),
        }
        Some(budget)
    }

    fn delete_budget(&mut self, id: i64) -> bool {
        self.try_delete_budget(id).unwrap_or_else(|e| {
            warn!("{e:#}");
            false
        })
    }
}

// ── Row decoding ──────────────────────────────────────────────

/// A stored value that no longer parses fails the whole read.
fn decode<T>(idx: usize, raw: &str, parsed: Option<T>) -> rusqlite::Result<T> {
    parsed.ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("invalid stored value: {raw:?}").into(),
        )
    })
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount: String = row.get(1)?;
    let date: String = row.get(2)?;
    let kind: String = row.get(4)?;
    Ok(Transaction {
        id: row.get(0)?,
        amount: decode(1, &amount, Decimal::from_str(&amount).ok())?,
        date: decode(2, &date, NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok())?,
        description: row.get(3)?,
        kind: decode(4, &kind, TransactionKind::parse(&kind))?,
        category: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let month: String = row.get(2)?;
    let amount: String = row.get(3)?;
    Ok(Budget {
        id: row.get(0)?,
        category: row.get(1)?,
        month: decode(2, &month, YearMonth::parse(&month))?,
        amount: decode(3, &amount, Decimal::from_str(&amount).ok())?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests;
