use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::{ensure_dir, NOTE_EXT};
use chrono::{NaiveDate, TimeDelta};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Location of one daily note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNote {
    pub path: PathBuf,
    /// Root-relative path, e.g. `Daily/2024/03/10.md`.
    pub label: String,
}

/// Well-known paths of a note store.
#[derive(Debug, Clone)]
pub struct NotePaths {
    pub root: PathBuf,
    pub daily_format: String,
}

impl NotePaths {
    /// Fails if `daily_format` cannot be rendered for a plain date.
    pub fn new(root: impl Into<PathBuf>, daily_format: impl Into<String>) -> Result<Self> {
        let paths = Self {
            root: root.into(),
            daily_format: daily_format.into(),
        };
        let probe = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        paths.daily_label(probe)?;
        Ok(paths)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.location(), config.daily_format.clone())
    }

    /// Create the store root. Idempotent.
    pub fn ensure_root(&self) -> Result<()> {
        ensure_dir(&self.root)
    }

    /// Relative daily-note path for `date`, extension included.
    pub fn daily_label(&self, date: NaiveDate) -> Result<String> {
        let mut label = String::new();
        write!(label, "{}", date.format(&self.daily_format)).map_err(|_| {
            StoreError::InvalidDateFormat {
                format: self.daily_format.clone(),
            }
        })?;
        label.push('.');
        label.push_str(NOTE_EXT);
        Ok(label)
    }

    /// Daily note for `today - offset` days (negative offsets are in the
    /// future). Creates the note's parent directory; the note itself is not
    /// touched.
    pub fn daily(&self, today: NaiveDate, offset: i64) -> Result<DailyNote> {
        let date = TimeDelta::try_days(offset)
            .and_then(|d| today.checked_sub_signed(d))
            .ok_or(StoreError::DateOutOfRange { offset })?;
        let label = self.daily_label(date)?;
        let path = self.root.join(&label);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(DailyNote { path, label })
    }

    /// Resolve a root-relative note path.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
