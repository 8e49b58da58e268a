use crate::error::{Result, StoreError};
use crate::paths::NotePaths;
use chrono::NaiveDate;
use sbr_core::{classify_line, CheckboxState, Task};
use std::fs;
use std::path::Path;

/// Read one note and keep the checkbox lines in `state`.
pub fn scan_tasks(path: &Path, label: &str, state: CheckboxState) -> Result<Vec<Task>> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .split('\n')
        .filter(|line| classify_line(line) == Some(state))
        .map(|line| Task {
            source: path.to_path_buf(),
            label: label.to_string(),
            line: line.to_string(),
            state,
        })
        .collect())
}

/// Scan the daily notes of the last `max_days` days, today first. Days
/// without a note are skipped.
pub fn collect_tasks(
    paths: &NotePaths,
    today: NaiveDate,
    max_days: u32,
    state: CheckboxState,
) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();
    for offset in 0..i64::from(max_days) {
        let note = paths.daily(today, offset)?;
        if !note.path.is_file() {
            continue;
        }
        let found = scan_tasks(&note.path, &note.label, state)?;
        tracing::debug!(
            note = %note.label,
            count = found.len(),
            state = state.as_str(),
            "scanned daily note"
        );
        tasks.extend(found);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn scan_keeps_only_requested_state() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("note.md");
        fs::write(
            &path,
            "# Notes\n* [ ] one\n- [x] two\n- [ ] three\ntext\n* [X] four\n",
        )
        .unwrap();

        let pending = scan_tasks(&path, "note.md", CheckboxState::Pending).unwrap();
        let lines: Vec<&str> = pending.iter().map(|t| t.line.as_str()).collect();
        assert_eq!(lines, vec!["* [ ] one", "- [ ] three"]);
        assert!(pending.iter().all(|t| t.label == "note.md" && t.source == path));

        let done = scan_tasks(&path, "note.md", CheckboxState::Done).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].key(), "two");
    }

    #[test]
    fn scan_missing_file_is_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        let err = scan_tasks(&tmp.path().join("nope.md"), "nope.md", CheckboxState::Pending)
            .unwrap_err();
        assert!(matches!(err, StoreError::FileUnreadable { .. }));
    }

    #[test]
    fn collect_is_ordered_by_recency() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = NotePaths::new(tmp.path(), "Daily/%Y/%m/%d").unwrap();
        let today = date(2024, 3, 10);
        for (offset, text) in [(4, "* [ ] four"), (0, "* [ ] zero"), (2, "* [ ] two")] {
            let note = paths.daily(today, offset).unwrap();
            fs::write(&note.path, format!("{text}\n")).unwrap();
        }

        let tasks = collect_tasks(&paths, today, 10, CheckboxState::Pending).unwrap();
        let keys: Vec<&str> = tasks.iter().map(Task::key).collect();
        assert_eq!(keys, vec!["zero", "two", "four"]);
        assert_eq!(tasks[1].label, "Daily/2024/03/08.md");
    }

    #[test]
    fn collect_stops_at_window() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = NotePaths::new(tmp.path(), "%Y-%m-%d").unwrap();
        let today = date(2024, 3, 10);
        let old = paths.daily(today, 5).unwrap();
        fs::write(&old.path, "* [ ] old\n").unwrap();

        assert!(collect_tasks(&paths, today, 5, CheckboxState::Pending)
            .unwrap()
            .is_empty());
        assert_eq!(
            collect_tasks(&paths, today, 6, CheckboxState::Pending)
                .unwrap()
                .len(),
            1
        );
    }
}
