mod config;
mod ledger;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_args(&mut args)?;
    logging::init(&config)?;
    let ledger = ledger::Ledger::open(&config.data_dir);
    tracing::debug!(args = ?args.get(1..), "starting");

    match args.get(1).map(String::as_str) {
        None | Some("menu") => run::as_console(&ledger),
        Some("tui") => run::as_tui(&ledger),
        Some(_) => run::as_cli(&args, &ledger),
    }
}
