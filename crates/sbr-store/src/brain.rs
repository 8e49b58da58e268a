//! The note store as seen by one invocation: configuration, the date used
//! as "today", and the currently selected target note.

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::paths::NotePaths;
use crate::scan::collect_tasks;
use crate::template::{find_template, instantiate};
use crate::{ensure_dir, list_files_recursive, NOTE_EXT};
use chrono::{Local, NaiveDate};
use regex::Regex;
use sbr_core::render::render_task_nesting;
use sbr_core::{group_by_tags, reconcile, CheckboxState, TagNode, Task};
use std::fs;
use std::path::{Path, PathBuf};

/// How far back `prev_daily` looks for an existing note.
pub const PREV_DAILY_LOOKBACK_DAYS: u32 = 64;

#[derive(Debug)]
pub struct Brain {
    config: Config,
    paths: NotePaths,
    today: NaiveDate,
    target: Option<PathBuf>,
}

impl Brain {
    /// Build a brain over `config`, creating the store root if needed.
    pub fn new(config: Config, today: NaiveDate) -> Result<Self> {
        let paths = NotePaths::from_config(&config)?;
        paths.ensure_root()?;
        Ok(Self {
            config,
            paths,
            today,
            target: None,
        })
    }

    /// Load (or create) the config at `config_path` and use the local date.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = Config::load_or_init(config_path)?;
        Self::new(config, Local::now().date_naive())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn paths(&self) -> &NotePaths {
        &self.paths
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    // ── Target selection ──

    /// Target today's daily note.
    pub fn daily(&mut self) -> Result<&Path> {
        self.daily_at(0)
    }

    /// Target tomorrow's daily note.
    pub fn next_daily(&mut self) -> Result<&Path> {
        self.daily_at(-1)
    }

    fn daily_at(&mut self, offset: i64) -> Result<&Path> {
        let note = self.paths.daily(self.today, offset)?;
        Ok(self.set_target(note.path))
    }

    fn set_target(&mut self, path: PathBuf) -> &Path {
        self.target.insert(path)
    }

    /// Target the most recent existing daily note before today.
    pub fn prev_daily(&mut self) -> Result<&Path> {
        for offset in 1..i64::from(PREV_DAILY_LOOKBACK_DAYS) {
            let note = self.paths.daily(self.today, offset)?;
            if note.path.is_file() {
                return Ok(self.set_target(note.path));
            }
        }
        Err(StoreError::NoPreviousDaily {
            days: PREV_DAILY_LOOKBACK_DAYS,
        })
    }

    /// Target a note by root-relative path, creating its directory when the
    /// note does not exist yet.
    pub fn open(&mut self, relative: &str) -> Result<&Path> {
        let path = self.paths.resolve(relative);
        if !path.is_file() {
            if let Some(parent) = path.parent() {
                ensure_dir(parent)?;
            }
        }
        Ok(self.set_target(path))
    }

    /// Notes whose root-relative path matches `pattern`. The first match
    /// becomes the target.
    pub fn find(&mut self, pattern: &str) -> Result<Vec<String>> {
        let query = Regex::new(pattern).map_err(|source| StoreError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let matches: Vec<String> = self
            .list_notes()?
            .into_iter()
            .filter(|n| query.is_match(n))
            .collect();
        let Some(first) = matches.first() else {
            return Err(StoreError::NoMatch {
                pattern: pattern.to_string(),
            });
        };
        self.target = Some(self.paths.resolve(first));
        Ok(matches)
    }

    // ── Note access ──

    pub fn list_notes(&self) -> Result<Vec<String>> {
        list_files_recursive(&self.paths.root, NOTE_EXT)
    }

    pub fn read_target(&self) -> Result<String> {
        let target = self.target.as_ref().ok_or(StoreError::MissingTarget)?;
        if !target.is_file() {
            return Err(StoreError::TargetNotFound {
                path: target.clone(),
            });
        }
        fs::read_to_string(target).map_err(|source| StoreError::FileUnreadable {
            path: target.clone(),
            source,
        })
    }

    /// Make the target ready for an editor: when it does not exist yet and a
    /// `Template.md` sits in one of its ancestor directories, seed it from
    /// the template.
    pub fn prepare_edit(&self) -> Result<PathBuf> {
        let target = self.target.clone().ok_or(StoreError::MissingTarget)?;
        self.seed_from_template(&target)?;
        Ok(target)
    }

    /// Returns whether a template was applied. Existing notes are left alone.
    fn seed_from_template(&self, target: &Path) -> Result<bool> {
        if target.is_file() {
            return Ok(false);
        }
        let Some(start) = target.parent() else {
            return Ok(false);
        };
        let Some(template) = find_template(start) else {
            return Ok(false);
        };
        let nesting = self.task_nesting(self.config.task_days)?;
        instantiate(&template, target, &render_task_nesting(&nesting))?;
        tracing::debug!(
            template = %template.display(),
            target = %target.display(),
            "seeded note from template"
        );
        Ok(true)
    }

    // ── Task aggregation ──

    pub fn collect_tasks(&self, max_days: u32, state: CheckboxState) -> Result<Vec<Task>> {
        collect_tasks(&self.paths, self.today, max_days, state)
    }

    /// Task keys still pending across the window, in discovery order.
    pub fn pending_tasks(&self, max_days: u32) -> Result<Vec<String>> {
        let pending = self.collect_tasks(max_days, CheckboxState::Pending)?;
        let done = self.collect_tasks(max_days, CheckboxState::Done)?;
        Ok(reconcile(&pending, &done))
    }

    pub fn task_nesting(&self, max_days: u32) -> Result<TagNode> {
        Ok(group_by_tags(&self.pending_tasks(max_days)?))
    }

    /// Done tasks followed by pending tasks, each with its note.
    pub fn all_tasks(&self, max_days: u32) -> Result<Vec<Task>> {
        let mut tasks = self.collect_tasks(max_days, CheckboxState::Done)?;
        tasks.extend(self.collect_tasks(max_days, CheckboxState::Pending)?);
        Ok(tasks)
    }
}
