mod run;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budgetwise::config::Config;
use budgetwise::db::Database;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = take_flag(&mut args, &["--verbose", "-v"]);
    init_tracing(verbose);

    let config = Config::from_env()?;
    let mut db = Database::open(&config.db_path)?;
    let mut session = run::Session {
        store: &mut db,
        config: &config,
        today: chrono::Local::now().date_naive(),
    };
    run::as_cli(&args, &mut session)
}

/// Remove every occurrence of a global flag, reporting whether it was present.
fn take_flag(args: &mut Vec<String>, names: &[&str]) -> bool {
    let before = args.len();
    args.retain(|a| !names.contains(&a.as_str()));
    args.len() != before
}

fn init_tracing(verbose: bool) {
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
