//! Persistence contract shared by the SQLite database and the in-memory store.

mod memory;

pub use memory::MemoryStore;

use chrono::{SecondsFormat, Utc};

use crate::models::{
    Budget, BudgetPatch, NewBudget, NewTransaction, Transaction, TransactionPatch, YearMonth,
};

/// Get/put/delete over the transaction and budget collections.
///
/// Implementations never surface storage failures: reads fall back to an
/// empty collection or `None`, writes are logged and the caller still gets
/// the record it asked for. Not-found is `None` / `false`.
pub trait RecordStore {
    /// Every transaction, in insertion order.
    fn list_transactions(&self) -> Vec<Transaction>;

    fn transaction(&self, id: i64) -> Option<Transaction> {
        self.list_transactions().into_iter().find(|t| t.id == id)
    }

    /// Store a new transaction under a freshly generated id and creation time.
    fn add_transaction(&mut self, new: NewTransaction) -> Transaction;

    /// Apply `patch` to an existing transaction. `None` if `id` is unknown.
    fn update_transaction(&mut self, id: i64, patch: &TransactionPatch) -> Option<Transaction>;

    fn delete_transaction(&mut self, id: i64) -> bool;

    /// Every budget, in insertion order.
    fn list_budgets(&self) -> Vec<Budget>;

    fn budget(&self, id: i64) -> Option<Budget> {
        self.list_budgets().into_iter().find(|b| b.id == id)
    }

    fn budget_for(&self, category: &str, month: YearMonth) -> Option<Budget> {
        self.list_budgets()
            .into_iter()
            .find(|b| b.same_slot(category, month))
    }

    /// Upsert by (category, month): an existing budget in that slot is
    /// dropped and the new one gets its own id and creation time.
    fn add_budget(&mut self, new: NewBudget) -> Budget;

    /// Apply `patch` to an existing budget. If that moves it onto a slot held
    /// by another budget, the other one is removed.
    fn update_budget(&mut self, id: i64, patch: &BudgetPatch) -> Option<Budget>;

    fn delete_budget(&mut self, id: i64) -> bool;
}

/// Creation timestamp for new records.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
