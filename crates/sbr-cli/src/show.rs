use termimad::MadSkin;

/// Render markdown to the terminal.
pub fn show_md(md: &str) {
    let skin = MadSkin::default();
    skin.print_text(md);
}
