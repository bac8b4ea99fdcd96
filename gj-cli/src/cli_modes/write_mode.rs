use super::{CliModeResult, resolve_date};
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result};
use gj_core::Journal;

/// `gj -g ... -c ... -o ... [--on DATE]`: replaces the given lists of a day,
/// keeping the lists that were not given.
pub fn write_mode(cli: &Cli, renderer: &Renderer, journal: &Journal) -> Result<CliModeResult> {
    let updates = cli.list_updates();
    if updates.is_empty() {
        return Ok(CliModeResult::NothingToDo);
    }

    let date = match cli.on.as_deref() {
        Some(token) => resolve_date(journal, token)?,
        None => journal.today(),
    };
    let saved = journal
        .update_lists(date, updates)
        .context("save failed")?;
    renderer.print_saved(&saved);
    Ok(CliModeResult::Finish)
}
