use anyhow::{Context, Result};
use tracing::info;

use budgetwise::analytics::{
    category_totals, compare_budgets, generate_insights, month_totals, monthly_series,
    monthly_spending_by_category, period_totals,
};
use budgetwise::config::MAX_TREND_MONTHS;
use budgetwise::format::{format_currency, format_month};
use budgetwise::models::{
    categories_for, BudgetPatch, TransactionKind, TransactionPatch, YearMonth,
};
use budgetwise::query::{SortBy, TransactionQuery};
use budgetwise::report::{
    render_budgets, render_categories, render_insights, render_summary, render_transactions,
    render_trend, QuickStats,
};
use budgetwise::validate::{validate_budget, validate_transaction, BudgetForm, TransactionForm};

use super::Session;

/// Positional arguments plus `--flag value` pairs.
struct Args<'a> {
    positional: Vec<&'a str>,
    flags: Vec<(&'a str, &'a str)>,
    switches: Vec<&'a str>,
}

impl<'a> Args<'a> {
    /// `with_value` flags consume the next argument; `switches` stand alone.
    fn parse(args: &'a [String], with_value: &[&str], switches: &[&str]) -> Result<Self> {
        let mut parsed = Args {
            positional: Vec::new(),
            flags: Vec::new(),
            switches: Vec::new(),
        };
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let arg = arg.as_str();
            if with_value.contains(&arg) {
                let value = iter
                    .next()
                    .with_context(|| format!("Missing value for {arg}"))?;
                parsed.flags.push((arg, value.as_str()));
            } else if switches.contains(&arg) {
                parsed.switches.push(arg);
            } else if arg.starts_with("--") {
                anyhow::bail!("Unknown option: {arg}");
            } else {
                parsed.positional.push(arg);
            }
        }
        Ok(parsed)
    }

    fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags
            .iter()
            .rev()
            .find(|(flag, _)| *flag == name)
            .map(|(_, value)| *value)
    }

    fn switch(&self, name: &str) -> bool {
        self.switches.contains(&name)
    }

    fn first(&self) -> Option<&'a str> {
        self.positional.first().copied()
    }
}

fn parse_month(raw: Option<&str>, session: &Session<'_>) -> Result<YearMonth> {
    match raw {
        Some(raw) => YearMonth::parse(raw)
            .with_context(|| format!("Invalid month: {raw} (expected YYYY-MM)")),
        None => Ok(YearMonth::of(session.today)),
    }
}

fn parse_id(raw: Option<&str>, usage: &str) -> Result<i64> {
    let raw = raw.with_context(|| format!("Usage: budgetwise {usage}"))?;
    raw.parse()
        .with_context(|| format!("Invalid id: {raw}"))
}

// ── Transactions ──────────────────────────────────────────────

pub(crate) fn cmd_add(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let usage = "add <income|expense> <amount> --category <name> --desc <text> [--date YYYY-MM-DD]";
    let args = Args::parse(args, &["--category", "--desc", "--date"], &[])?;
    if args.positional.len() != 2 {
        anyhow::bail!("Usage: budgetwise {usage}");
    }

    let form = TransactionForm {
        kind: args.positional[0].to_string(),
        amount: args.positional[1].to_string(),
        category: args.flag("--category").unwrap_or_default().to_string(),
        description: args.flag("--desc").unwrap_or_default().to_string(),
        date: args
            .flag("--date")
            .map(str::to_string)
            .unwrap_or_else(|| session.today.to_string()),
    };
    let new = validate_transaction(&form)?;
    let txn = session.store.add_transaction(new);
    info!(id = txn.id, "transaction recorded");
    println!(
        "Added {} #{}: {} {} ({})",
        txn.kind,
        txn.id,
        format_currency(txn.amount),
        txn.category,
        txn.description
    );
    Ok(())
}

pub(crate) fn cmd_edit(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(
        args,
        &["--amount", "--date", "--desc", "--type", "--category"],
        &[],
    )?;
    let id = parse_id(args.first(), "edit <id> [--amount N] [--date D] ...")?;
    let existing = session
        .store
        .transaction(id)
        .with_context(|| format!("Transaction #{id} not found"))?;

    let mut form = TransactionForm::from_transaction(&existing);
    if let Some(amount) = args.flag("--amount") {
        form.amount = amount.to_string();
    }
    if let Some(date) = args.flag("--date") {
        form.date = date.to_string();
    }
    if let Some(desc) = args.flag("--desc") {
        form.description = desc.to_string();
    }
    if let Some(kind) = args.flag("--type") {
        form.kind = kind.to_string();
    }
    if let Some(category) = args.flag("--category") {
        form.category = category.to_string();
    }

    let patch = TransactionPatch::replace_with(validate_transaction(&form)?);
    match session.store.update_transaction(id, &patch) {
        Some(txn) => println!(
            "Updated #{}: {} {} {} ({})",
            txn.id,
            txn.kind,
            format_currency(txn.amount),
            txn.category,
            txn.description
        ),
        None => anyhow::bail!("Transaction #{id} not found"),
    }
    Ok(())
}

pub(crate) fn cmd_delete(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &[], &[])?;
    let id = parse_id(args.first(), "delete <id>")?;
    if session.store.delete_transaction(id) {
        println!("Deleted transaction #{id}");
        Ok(())
    } else {
        anyhow::bail!("Transaction #{id} not found")
    }
}

pub(crate) fn cmd_list(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(
        args,
        &["--search", "--type", "--category", "--month", "--sort"],
        &[],
    )?;

    let kind = match args.flag("--type") {
        Some(raw) => Some(
            TransactionKind::parse(raw)
                .with_context(|| format!("Invalid type: {raw} (expected income or expense)"))?,
        ),
        None => None,
    };
    let sort = match args.flag("--sort") {
        Some(raw) => SortBy::parse(raw).with_context(|| format!("Invalid sort: {raw}"))?,
        None => SortBy::default(),
    };
    let query = TransactionQuery {
        search: args.flag("--search").map(str::to_string),
        kind,
        category: args.flag("--category").map(str::to_string),
        sort,
    };

    let mut transactions = session.store.list_transactions();
    if let Some(raw) = args.flag("--month") {
        let month = parse_month(Some(raw), session)?;
        transactions.retain(|t| month.contains(t.date));
    }

    let shown = query.apply(&transactions);
    println!("{}", render_transactions(&shown, &period_totals(&shown)));
    Ok(())
}

// ── Budgets ───────────────────────────────────────────────────

pub(crate) fn cmd_budget(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &["--month"], &[])?;
    let joined = args.positional.join(" ");

    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = joined.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        anyhow::bail!("Usage: budgetwise budget <category> <amount> [--month YYYY-MM]");
    }

    let month = parse_month(args.flag("--month"), session)?;
    let form = BudgetForm {
        category: parts[1].to_string(),
        amount: parts[0].to_string(),
        month: month.to_string(),
    };
    let new = validate_budget(&form)?;
    let replaced = session.store.budget_for(&new.category, new.month);
    let budget = session.store.add_budget(new);

    println!(
        "Budget #{} set: {} {} for {}",
        budget.id,
        budget.category,
        format_currency(budget.amount),
        format_month(budget.month)
    );
    if let Some(old) = replaced {
        println!(
            "  (replaced #{} of {})",
            old.id,
            format_currency(old.amount)
        );
    }
    Ok(())
}

pub(crate) fn cmd_budget_edit(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &["--amount", "--category", "--month"], &[])?;
    let id = parse_id(
        args.first(),
        "budget-edit <id> [--amount N] [--category NAME] [--month YYYY-MM]",
    )?;
    let existing = session
        .store
        .budget(id)
        .with_context(|| format!("Budget #{id} not found"))?;

    let mut form = BudgetForm::from_budget(&existing);
    if let Some(amount) = args.flag("--amount") {
        form.amount = amount.to_string();
    }
    if let Some(category) = args.flag("--category") {
        form.category = category.to_string();
    }
    if let Some(month) = args.flag("--month") {
        form.month = month.to_string();
    }

    let new = validate_budget(&form)?;
    let displaced = session
        .store
        .budget_for(&new.category, new.month)
        .filter(|b| b.id != id);
    match session.store.update_budget(id, &BudgetPatch::replace_with(new)) {
        Some(budget) => {
            println!(
                "Updated budget #{}: {} {} for {}",
                budget.id,
                budget.category,
                format_currency(budget.amount),
                format_month(budget.month)
            );
            if let Some(old) = displaced {
                println!("  (replaced #{})", old.id);
            }
            Ok(())
        }
        None => anyhow::bail!("Budget #{id} not found"),
    }
}

pub(crate) fn cmd_budget_delete(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &[], &[])?;
    let id = parse_id(args.first(), "budget-delete <id>")?;
    if session.store.delete_budget(id) {
        println!("Deleted budget #{id}");
        Ok(())
    } else {
        anyhow::bail!("Budget #{id} not found")
    }
}

pub(crate) fn cmd_budgets(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &[], &[])?;
    let month = parse_month(args.first(), session)?;
    let transactions = session.store.list_transactions();
    let budgets = session.store.list_budgets();

    let spending = monthly_spending_by_category(&transactions, month);
    println!("{}", render_budgets(&compare_budgets(&budgets, &spending, month)));
    Ok(())
}

// ── Reports ───────────────────────────────────────────────────

pub(crate) fn cmd_summary(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &[], &[])?;
    let month = parse_month(args.first(), session)?;
    let transactions = session.store.list_transactions();
    let budgets = session.store.list_budgets();

    let totals = month_totals(&transactions, month);
    let spending = monthly_spending_by_category(&transactions, month);
    let stats = QuickStats::compute(&transactions, &budgets, month);
    println!("{}", render_summary(&totals, &spending, &stats));
    Ok(())
}

pub(crate) fn cmd_trend(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &["--months"], &[])?;
    let end = parse_month(args.first(), session)?;
    let months = match args.flag("--months") {
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=MAX_TREND_MONTHS).contains(m))
            .with_context(|| {
                format!("Invalid --months: {raw} (expected 1 to {MAX_TREND_MONTHS})")
            })?,
        None => session.config.trend_months,
    };

    let transactions = session.store.list_transactions();
    println!("{}", render_trend(&monthly_series(&transactions, end, months)));
    Ok(())
}

pub(crate) fn cmd_categories(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &[], &["--list"])?;
    if args.switch("--list") {
        for (i, kind) in TransactionKind::all().iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{} categories:", kind.label());
            for name in categories_for(*kind) {
                println!("  {name}");
            }
        }
        return Ok(());
    }

    let transactions = session.store.list_transactions();
    println!("{}", render_categories(&category_totals(&transactions)));
    Ok(())
}

pub(crate) fn cmd_insights(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let args = Args::parse(args, &[], &[])?;
    let month = parse_month(args.first(), session)?;
    let transactions = session.store.list_transactions();
    let budgets = session.store.list_budgets();

    println!("Insights for {}", format_month(month));
    println!();
    println!(
        "{}",
        render_insights(&generate_insights(&transactions, &budgets, month))
    );
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
