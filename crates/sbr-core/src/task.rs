use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::LazyLock;

/// `* [ ] ...`, `- [x] ...`. The box holds a single whitespace char or `x`.
static CHECKBOX_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*-] \[(\s|x)\].*$").expect("checkbox regex"));

/// Number of chars in the `* [ ] ` marker stripped to form a task key.
const MARKER_CHARS: usize = 6;

/// State of a checkbox task line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckboxState {
    Pending,
    Done,
}

impl CheckboxState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckboxState::Pending => "pending",
            CheckboxState::Done => "done",
        }
    }
}

/// Classify a single line. Returns `None` for anything that is not a
/// checkbox task line. `[X]` is not a done marker.
pub fn classify_line(line: &str) -> Option<CheckboxState> {
    let caps = CHECKBOX_LINE.captures(line)?;
    match caps.get(1).map(|m| m.as_str()) {
        Some("x") => Some(CheckboxState::Done),
        Some(_) => Some(CheckboxState::Pending),
        None => None,
    }
}

/// Reconciliation key of a task line: the text after the checkbox marker,
/// trimmed.
pub fn task_key(line: &str) -> &str {
    match line.char_indices().nth(MARKER_CHARS) {
        Some((idx, _)) => line[idx..].trim(),
        None => "",
    }
}

/// One checkbox line found in a daily note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Full path of the note the line was read from.
    pub source: PathBuf,
    /// Root-relative note path, for display.
    pub label: String,
    /// The matched line, marker included.
    pub line: String,
    pub state: CheckboxState,
}

impl Task {
    pub fn key(&self) -> &str {
        task_key(&self.line)
    }
}

/// Pending keys minus done keys, deduplicated, in order of first discovery.
///
/// Matching is purely textual: a done line in any note resolves a pending
/// line with the same key in any other note.
pub fn reconcile(pending: &[Task], done: &[Task]) -> Vec<String> {
    let done_keys: HashSet<&str> = done.iter().map(Task::key).collect();
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for task in pending {
        let key = task.key();
        if done_keys.contains(key) || !seen.insert(key) {
            continue;
        }
        out.push(key.to_string());
    }
    out
}
