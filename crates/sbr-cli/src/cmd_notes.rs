use crate::show::show_md;
use sbr_core::render::render_note_list;
use sbr_store::Brain;

/// `sb --list`
pub fn list(brain: &Brain) -> anyhow::Result<()> {
    let notes = brain.list_notes()?;
    show_md(&render_note_list("List of Notes", notes.as_slice()));
    Ok(())
}

/// `sb --grep <pattern>`
pub fn grep(brain: &mut Brain, pattern: &str) -> anyhow::Result<()> {
    let matches = brain.find(pattern)?;
    show_md(&render_note_list(
        &format!("Matches '{pattern}'"),
        matches.as_slice(),
    ));
    Ok(())
}

/// `sb --view` (default): render the target note.
pub fn view(brain: &Brain) -> anyhow::Result<()> {
    let content = brain.read_target()?;
    show_md(&content);
    Ok(())
}
