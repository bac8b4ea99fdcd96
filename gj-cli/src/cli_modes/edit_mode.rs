use super::{
    CliModeResult,
    editor_utils::{edit_in_buffer, resolve_editor},
    resolve_date,
};
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result};
use gj_core::{Journal, parse_input::parse_entry_template, render::format_entry_template};

/// Opens `$EDITOR` on a day's entry, prefilled with what is already saved.
/// This is the default mode, on today, when no other mode applies.
pub fn edit_mode(cli: &Cli, renderer: &Renderer, journal: &Journal) -> Result<CliModeResult> {
    let date = match cli.edit.as_deref() {
        Some(token) => resolve_date(journal, token)?,
        None => journal.today(),
    };
    let existed = journal.has_entry(date);
    let draft = journal.draft_for(date);
    let template = format_entry_template(&draft);

    let editor = resolve_editor(&journal.config.editor);
    let buffer = edit_in_buffer(&editor, &template)?;
    if buffer.trim() == template.trim() {
        renderer.print_info("No changes, nothing saved.");
        return Ok(CliModeResult::Finish);
    }

    let entry = parse_entry_template(&buffer, date).context("reading the edited entry")?;
    if entry.is_blank() && !existed {
        renderer.print_info("No entry to save, because no text was received.");
        return Ok(CliModeResult::Finish);
    }

    let saved = journal.save_entry(date, entry).context("save failed")?;
    renderer.print_saved(&saved);
    Ok(CliModeResult::Finish)
}
