use crate::show::show_md;
use sbr_core::render::{render_all_tasks, render_pending_report};
use sbr_store::Brain;

/// `sb --tasks`: pending tasks grouped by dominant tag.
pub fn pending(brain: &Brain, days: u32, json: bool) -> anyhow::Result<()> {
    let nesting = brain.task_nesting(days)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&nesting)?);
        return Ok(());
    }
    show_md(&render_pending_report(&nesting));
    Ok(())
}

/// `sb --alltasks`: every done and pending task with the note it lives in.
pub fn all(brain: &Brain, days: u32, json: bool) -> anyhow::Result<()> {
    let tasks = brain.all_tasks(days)?;
    if json {
        for t in &tasks {
            println!("{}", serde_json::to_string(t)?);
        }
        return Ok(());
    }
    show_md(&render_all_tasks(&tasks));
    Ok(())
}
