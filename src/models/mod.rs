mod budget;
mod category;
mod month;
mod transaction;

pub use budget::{Budget, BudgetPatch, NewBudget};
pub use category::{categories_for, find_category, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use month::{ParseMonthError, YearMonth};
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionPatch};
