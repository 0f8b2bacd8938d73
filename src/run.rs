mod cli;
mod console;
mod tui;

use chrono::{Local, NaiveDateTime};

pub(crate) use cli::as_cli;
pub(crate) use console::as_console;
pub(crate) use tui::as_tui;

/// Wall-clock time as stored in the ledger.
pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
