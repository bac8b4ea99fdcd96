use anyhow::{Context, Result};
use std::{fs, path::Path, process::Command};

pub fn resolve_editor(editor: &Option<String>) -> String {
    editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Writes `initial` to a temp file, opens it in the editor and returns what
/// was saved.
pub fn edit_in_buffer(editor_cmd: &str, initial: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("gj")
        .suffix(".md")
        .tempfile()
        .context("creating editor buffer")?;

    let path = file.path().to_path_buf();
    fs::write(&path, initial).with_context(|| format!("writing {}", path.display()))?;
    open_file_in_editor(editor_cmd, &path)?;
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

pub fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd)
        .arg(path)
        .status()
        .with_context(|| format!("launching editor `{editor_cmd}`"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}
