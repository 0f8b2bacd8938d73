use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub(crate) const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DIR";
const DATA_DIR_FLAG: &str = "--data-dir";
const LOG_FILE: &str = "expense-tracker.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration and strip `--data-dir <path>` from `args`
    /// so the remaining arguments are the command line proper.
    /// The data directory is created if it does not exist.
    pub(crate) fn from_args(args: &mut Vec<String>) -> Result<Self> {
        let flag = take_flag_value(args, DATA_DIR_FLAG)?;
        let data_dir = resolve_data_dir(flag, std::env::var_os(DATA_DIR_ENV))?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// Flag beats environment, environment beats the platform data directory.
pub(crate) fn resolve_data_dir(flag: Option<String>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(PathBuf::from(expand_home(&dir)));
    }
    if let Some(dir) = env.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = directories::ProjectDirs::from("com", "expense-tracker", "ExpenseTracker")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Remove `flag <value>` or `flag=<value>` from `args`, returning the value.
pub(crate) fn take_flag_value(args: &mut Vec<String>, flag: &str) -> Result<Option<String>> {
    let prefix = format!("{flag}=");
    let Some(pos) = args
        .iter()
        .position(|a| a == flag || a.starts_with(&prefix))
    else {
        return Ok(None);
    };

    let arg = args.remove(pos);
    if let Some(value) = arg.strip_prefix(&prefix) {
        return Ok(Some(value.to_string()));
    }
    if pos < args.len() {
        Ok(Some(args.remove(pos)))
    } else {
        anyhow::bail!("{flag} requires a value")
    }
}

pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = directories::UserDirs::new()
            .map(|d| d.home_dir().display().to_string())
            .unwrap_or_else(|| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
