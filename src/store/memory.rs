use tracing::debug;

use super::{timestamp, RecordStore};
use crate::models::{Budget, BudgetPatch, NewBudget, NewTransaction, Transaction, TransactionPatch};

/// Process-local store. Ids come from a single counter shared by both collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl RecordStore for MemoryStore {
    fn list_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    fn add_transaction(&mut self, new: NewTransaction) -> Transaction {
        let txn = Transaction::from_new(self.next_id(), new, timestamp());
        debug!(id = txn.id, "transaction added");
        self.transactions.push(txn.clone());
        txn
    }

    fn update_transaction(&mut self, id: i64, patch: &TransactionPatch) -> Option<Transaction> {
        let txn = self.transactions.iter_mut().find(|t| t.id == id)?;
        txn.apply(patch);
        Some(txn.clone())
    }

    fn delete_transaction(&mut self, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() < before
    }

    fn list_budgets(&self) -> Vec<Budget> {
        self.budgets.clone()
    }

    fn add_budget(&mut self, new: NewBudget) -> Budget {
        self.budgets.retain(|b| !b.same_slot(&new.category, new.month));
        let budget = Budget::from_new(self.next_id(), new, timestamp());
        debug!(id = budget.id, "budget saved");
        self.budgets.push(budget.clone());
        budget
    }

    fn update_budget(&mut self, id: i64, patch: &BudgetPatch) -> Option<Budget> {
        let mut updated = self.budgets.iter().find(|b| b.id == id)?.clone();
        updated.apply(patch);
        self.budgets
            .retain(|b| b.id == id || !b.same_slot(&updated.category, updated.month));
        let slot = self.budgets.iter_mut().find(|b| b.id == id)?;
        *slot = updated.clone();
        Some(updated)
    }

    fn delete_budget(&mut self, id: i64) -> bool {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.id != id);
        self.budgets.len() < before
    }
}
