//! Markdown views over tasks and their grouping.

use crate::group::{TagGroup, TagNode};
use crate::task::Task;

/// `* [ ] item` lines joined by newlines, no trailing newline.
pub fn render_checklist<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|i| format!("* [ ] {}", i.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a grouping as markdown: root `_` tasks first, then one `##`
/// section per level-1 tag, with `###` sections for level-2 tags.
pub fn render_task_nesting(node: &TagNode) -> String {
    let mut out = String::new();
    if let Some(items) = &node.ungrouped {
        out.push_str(&render_checklist(items.as_slice()));
    }
    for (tag, group) in &node.groups {
        out.push_str(&format!("\n\n## {tag}\n\n"));
        match group {
            TagGroup::Leaf(items) => out.push_str(&render_checklist(items.as_slice())),
            TagGroup::Node(sub) => {
                if let Some(items) = &sub.ungrouped {
                    out.push_str(&render_checklist(items.as_slice()));
                }
                for (subtag, subgroup) in &sub.groups {
                    out.push_str(&format!("\n\n### {subtag}\n\n"));
                    out.push_str(&render_checklist(subgroup_items(subgroup).as_slice()));
                }
            }
        }
    }
    out
}

// Level-2 children are always leaves; anything deeper is flattened.
fn subgroup_items(group: &TagGroup) -> Vec<&str> {
    match group {
        TagGroup::Leaf(items) => items.iter().map(String::as_str).collect(),
        TagGroup::Node(node) => node.tasks(),
    }
}

pub fn render_pending_report(node: &TagNode) -> String {
    format!("# Pending Tasks\n{}", render_task_nesting(node))
}

/// `# All tasks` followed by `<line> in **<label>**` per task.
pub fn render_all_tasks(tasks: &[Task]) -> String {
    let mut lines = vec!["# All tasks".to_string()];
    lines.extend(tasks.iter().map(|t| format!("{} in **{}**", t.line, t.label)));
    lines.join("\n")
}

pub fn render_note_list<S: AsRef<str>>(title: &str, items: &[S]) -> String {
    let body = items
        .iter()
        .map(|i| format!("- {}", i.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("# {title}\n{body}")
}
