use super::TransactionKind;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Personal Care",
    "Groceries",
    "Rent/EMI",
    "Mobile/Internet",
    "Fuel",
    "Insurance",
    "Other",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Business",
    "Rental Income",
    "Interest",
    "Dividend",
    "Gift",
    "Bonus",
    "Other",
];

/// The fixed category list a transaction of `kind` may use.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Find a category by name (case-insensitive), returning its canonical spelling.
pub fn find_category(kind: TransactionKind, name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    categories_for(kind)
        .iter()
        .copied()
        .find(|c| c.to_lowercase() == lower)
}
