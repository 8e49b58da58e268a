use crate::error::{Result, StoreError};
use crate::write_atomic;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEMPLATE_FILE: &str = "Template.md";

/// Placeholder replaced by the pending-task listing.
pub const TASKS_TOKEN: &str = "%tasks%";

/// Walk up from `start` looking for `Template.md`. The filesystem root itself
/// is not searched.
pub fn find_template(start: &Path) -> Option<PathBuf> {
    let mut cur = start.to_path_buf();
    while cur.parent().is_some() && !cur.as_os_str().is_empty() {
        let candidate = cur.join(TEMPLATE_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        cur.pop();
    }
    None
}

pub fn substitute_tasks(template: &str, tasks_md: &str) -> String {
    template.replace(TASKS_TOKEN, tasks_md)
}

/// Write `target` from `template` with every `%tasks%` replaced.
pub fn instantiate(template: &Path, target: &Path, tasks_md: &str) -> Result<()> {
    let content = fs::read_to_string(template).map_err(|source| StoreError::FileUnreadable {
        path: template.to_path_buf(),
        source,
    })?;
    write_atomic(target, substitute_tasks(&content, tasks_md).as_bytes())
}
