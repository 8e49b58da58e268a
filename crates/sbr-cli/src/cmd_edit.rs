use sbr_store::Brain;
use std::path::Path;
use std::process::{Command, Stdio};

const DEFAULT_EDITOR: &str = "vim";

/// Split an `$EDITOR` value into program and leading arguments.
fn editor_command(editor: Option<&str>) -> (String, Vec<String>) {
    let editor = editor
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_EDITOR);
    let mut parts = editor.split_whitespace().map(String::from);
    let program = parts.next().unwrap_or_else(|| DEFAULT_EDITOR.to_string());
    (program, parts.collect())
}

/// `sb --edit`: seed the target from a template if needed, then open it.
pub fn execute(brain: &Brain) -> anyhow::Result<()> {
    let target = brain.prepare_edit()?;
    let editor = std::env::var("EDITOR").ok();
    launch(editor.as_deref(), &target)
}

fn launch(editor: Option<&str>, target: &Path) -> anyhow::Result<()> {
    let (program, args) = editor_command(editor);
    tracing::debug!(editor = %program, target = %target.display(), "launching editor");
    let status = Command::new(&program)
        .args(&args)
        .arg(target)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| anyhow::anyhow!("cannot run editor {program}: {e}"))?;
    if !status.success() {
        anyhow::bail!("editor {program} exited with {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_defaults_to_vim() {
        assert_eq!(editor_command(None), ("vim".to_string(), vec![]));
        assert_eq!(editor_command(Some("  ")), ("vim".to_string(), vec![]));
    }

    #[test]
    fn editor_with_arguments_is_split() {
        assert_eq!(
            editor_command(Some("code -w")),
            ("code".to_string(), vec!["-w".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn launch_reports_failing_editor() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("note.md");
        assert!(launch(Some("true"), &target).is_ok());
        assert!(launch(Some("false"), &target).is_err());
    }
}
