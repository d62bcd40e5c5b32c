mod cli;

use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use budgetwise::config::Config;
use budgetwise::store::RecordStore;

/// Everything a command needs for one invocation.
pub(crate) struct Session<'a> {
    pub(crate) store: &'a mut dyn RecordStore,
    pub(crate) config: &'a Config,
    /// Read from the clock once, at startup.
    pub(crate) today: NaiveDate,
}

pub(crate) struct Command {
    pub(crate) usage: &'static str,
    pub(crate) description: &'static str,
    pub(crate) run: fn(&[String], &mut Session<'_>) -> Result<()>,
}

macro_rules! register_command {
    ($name:expr, $usage:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                usage: $usage,
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!(
        "add",
        "add <income|expense> <amount> --category <name> --desc <text> [--date YYYY-MM-DD]",
        "Record a transaction (date defaults to today)",
        cli::cmd_add,
        r
    );
    register_command!(
        "edit",
        "edit <id> [--amount N] [--date YYYY-MM-DD] [--desc TEXT] [--type T] [--category NAME]",
        "Change fields of a transaction",
        cli::cmd_edit,
        r
    );
    register_command!(
        "delete",
        "delete <id>",
        "Delete a transaction",
        cli::cmd_delete,
        r
    );
    register_command!(
        "list",
        "list [--search TEXT] [--type T] [--category NAME] [--month YYYY-MM] [--sort date|amount|category|description]",
        "Transaction history with totals",
        cli::cmd_list,
        r
    );
    register_command!(
        "budget",
        "budget <category> <amount> [--month YYYY-MM]",
        "Set a monthly budget, replacing any existing one for that category and month",
        cli::cmd_budget,
        r
    );
    register_command!(
        "budget-edit",
        "budget-edit <id> [--amount N] [--category NAME] [--month YYYY-MM]",
        "Change fields of a budget",
        cli::cmd_budget_edit,
        r
    );
    register_command!(
        "budget-delete",
        "budget-delete <id>",
        "Delete a budget",
        cli::cmd_budget_delete,
        r
    );
    register_command!(
        "budgets",
        "budgets [YYYY-MM]",
        "Budget progress for a month",
        cli::cmd_budgets,
        r
    );
    register_command!(
        "summary",
        "summary [YYYY-MM]",
        "Monthly totals, category spending and quick stats",
        cli::cmd_summary,
        r
    );
    register_command!(
        "trend",
        "trend [YYYY-MM] [--months N]",
        "Income, expenses and net per month",
        cli::cmd_trend,
        r
    );
    register_command!(
        "categories",
        "categories [--list]",
        "All-time spending per category (--list shows the valid names)",
        cli::cmd_categories,
        r
    );
    register_command!(
        "insights",
        "insights [YYYY-MM]",
        "Observations about a month's spending",
        cli::cmd_insights,
        r
    );
    register_command!("help", "help", "Show available commands", cmd_help, r);
    register_command!("version", "version", "Show version", cmd_version, r);

    r
});

pub(crate) fn as_cli(args: &[String], session: &mut Session<'_>) -> Result<()> {
    let Some((name, rest)) = args.split_first() else {
        print_usage();
        return Ok(());
    };
    let name = match name.as_str() {
        "--help" | "-h" => "help",
        "--version" | "-V" => "version",
        "s" => "summary",
        "ls" => "list",
        other => other,
    };

    match COMMANDS.get(name) {
        Some(command) => {
            debug!(command = name, "dispatch");
            (command.run)(rest, session)
        }
        None => {
            print_usage();
            anyhow::bail!("Unknown command: {name}");
        }
    }
}

fn print_usage() {
    println!("Budgetwise - personal budgeting from the command line");
    println!();
    println!("Usage: budgetwise [--verbose] <command> [args]");
    println!();
    println!("Commands:");

    let mut entries: Vec<(&&str, &Command)> = COMMANDS.iter().collect();
    entries.sort_by_key(|(name, _)| **name);
    for (name, command) in entries {
        println!("  {:<15} {}", name, command.description);
        println!("  {:<15}   {}", "", command.usage);
    }

    println!();
    println!("Environment:");
    println!("  BUDGETWISE_DB            Database file (default: platform data directory)");
    println!("  BUDGETWISE_TREND_MONTHS  Months shown by `trend` (default: 6)");
    println!("  RUST_LOG                 Log filter, overrides --verbose");
}

fn cmd_help(_args: &[String], _session: &mut Session<'_>) -> Result<()> {
    print_usage();
    Ok(())
}

fn cmd_version(_args: &[String], _session: &mut Session<'_>) -> Result<()> {
    println!("budgetwise {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
