//! Budgetwise: local personal budgeting.
//!
//! Transactions and monthly budgets live in a [`store::RecordStore`]; the
//! [`analytics`] functions turn snapshots of them into monthly series,
//! category breakdowns, budget comparisons and insights.

pub mod analytics;
pub mod config;
pub mod db;
pub mod format;
pub mod models;
pub mod query;
pub mod report;
pub mod store;
pub mod validate;

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;



#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;
