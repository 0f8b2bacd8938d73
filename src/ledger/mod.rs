mod format;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::{parse_date, Budget, Expense, DATE_FORMAT};

pub(crate) const BUDGET_FILE: &str = "budget.txt";
const DAY_FILE_EXT: &str = ".txt";
/// Prefix used by older day files, e.g. `expense_02-01-2025.txt`.
const LEGACY_DAY_PREFIX: &str = "expense_";

/// A directory of per-day expense files plus one budget file.
pub(crate) struct Ledger {
    dir: PathBuf,
}

impl Ledger {
    pub(crate) fn open(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn day_file_name(day: NaiveDate) -> String {
        format!("{}{DAY_FILE_EXT}", day.format(DATE_FORMAT))
    }

    /// Date of a day file, or `None` for anything that is not one.
    pub(crate) fn parse_day_file_name(name: &str) -> Option<NaiveDate> {
        let stem = name.strip_suffix(DAY_FILE_EXT)?;
        let stem = stem.strip_prefix(LEGACY_DAY_PREFIX).unwrap_or(stem);
        // parse_date trims; a day file name must not carry spaces
        if stem.trim() != stem {
            return None;
        }
        parse_date(stem)
    }

    /// All day files, oldest first. A missing directory is an empty ledger.
    pub(crate) fn day_files(&self) -> Result<Vec<(NaiveDate, PathBuf)>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read ledger directory: {}", self.dir.display())
                })
            }
        };

        let mut files: Vec<(NaiveDate, PathBuf)> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter_map(|p| {
                let day = p
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(Self::parse_day_file_name)?;
                Some((day, p))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    pub(crate) fn append_record(&self, day: NaiveDate, record: &Expense) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create ledger directory: {}", self.dir.display())
        })?;
        let path = self.dir.join(Self::day_file_name(day));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        format::write_records(file, [record])
            .with_context(|| format!("Failed to append to {}", path.display()))?;
        tracing::info!(file = %path.display(), amount = %record.amount, category = %record.category, "expense appended");
        Ok(())
    }

    /// Records of one day file, skipping malformed lines.
    pub(crate) fn read_day_file(&self, path: &Path) -> Result<Vec<Expense>> {
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let (records, skipped) = format::read_records(file)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        for skip in &skipped {
            tracing::debug!(file = %path.display(), line = skip.line, error = %skip.error, "skipping malformed line");
        }
        Ok(records)
    }

    /// Every record for which `predicate` holds, in day-file order.
    pub(crate) fn list_records(&self, predicate: impl Fn(&Expense) -> bool) -> Result<Vec<Expense>> {
        let mut out = Vec::new();
        for (_, path) in self.day_files()? {
            out.extend(self.read_day_file(&path)?.into_iter().filter(|r| predicate(r)));
        }
        Ok(out)
    }

    pub(crate) fn list_all(&self) -> Result<Vec<Expense>> {
        self.list_records(|_| true)
    }

    /// Records from day files dated within `from..=to`.
    pub(crate) fn list_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        if from > to {
            anyhow::bail!("'From' date must be before 'To' date!");
        }
        let mut out = Vec::new();
        for (day, path) in self.day_files()? {
            if (from..=to).contains(&day) {
                out.extend(self.read_day_file(&path)?);
            }
        }
        Ok(out)
    }

    /// Records grouped by day file, for display.
    pub(crate) fn grouped_by_day(&self) -> Result<Vec<(String, Vec<Expense>)>> {
        let mut groups = Vec::new();
        for (_, path) in self.day_files()? {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            groups.push((name, self.read_day_file(&path)?));
        }
        Ok(groups)
    }

    pub(crate) fn set_budget(&self, budget: Budget) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create ledger directory: {}", self.dir.display())
        })?;
        let path = self.budget_path();
        let value = budget.limit().unwrap_or_default().to_string();
        fs::write(&path, format!("{value}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(budget = %value, "monthly budget set");
        Ok(())
    }

    /// The stored budget. A missing or unreadable value is "not set".
    pub(crate) fn get_budget(&self) -> Result<Budget> {
        let path = self.budget_path();
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Budget::not_set()),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };
        let first_line = contents.lines().next().unwrap_or("").trim();
        if first_line.is_empty() {
            return Ok(Budget::not_set());
        }
        match Budget::parse(first_line) {
            Ok(budget) => Ok(budget),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "ignoring unreadable budget");
                Ok(Budget::not_set())
            }
        }
    }

    /// Remove every file for `day`. Returns whether anything was removed.
    pub(crate) fn delete_day(&self, day: NaiveDate) -> Result<bool> {
        let mut removed = false;
        for (file_day, path) in self.day_files()? {
            if file_day == day {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to delete {}", path.display()))?;
                tracing::info!(file = %path.display(), "day file deleted");
                removed = true;
            }
        }
        Ok(removed)
    }

    /// Remove every day file, keeping the budget. Returns the number removed.
    pub(crate) fn clear_all(&self) -> Result<usize> {
        let files = self.day_files()?;
        for (_, path) in &files {
            fs::remove_file(path)
                .with_context(|| format!("Failed to delete {}", path.display()))?;
        }
        tracing::info!(count = files.len(), "ledger cleared");
        Ok(files.len())
    }

    /// Replace the whole ledger with `records`, one file per record date.
    pub(crate) fn rewrite(&self, records: &[Expense]) -> Result<()> {
        let mut by_day: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
        for record in records {
            by_day.entry(record.date()).or_default().push(record);
        }

        self.clear_all()?;
        if by_day.is_empty() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create ledger directory: {}", self.dir.display())
        })?;
        for (day, day_records) in by_day {
            let path = self.dir.join(Self::day_file_name(day));
            let file = fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            format::write_records(file, day_records)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        tracing::info!(count = records.len(), "ledger rewritten");
        Ok(())
    }

    /// Remove the first record equal to `target`. Returns whether one was found.
    pub(crate) fn remove_record(&self, target: &Expense) -> Result<bool> {
        let mut records = self.list_all()?;
        let Some(pos) = records.iter().position(|r| r == target) else {
            return Ok(false);
        };
        records.remove(pos);
        self.rewrite(&records)?;
        Ok(true)
    }

    fn budget_path(&self) -> PathBuf {
        self.dir.join(BUDGET_FILE)
    }
}

#[cfg(test)]
mod tests;
