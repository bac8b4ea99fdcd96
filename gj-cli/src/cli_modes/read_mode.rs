use super::{CliModeResult, resolve_date};
use crate::{Cli, render::Renderer};
use anyhow::Result;
use gj_core::Journal;

pub fn read_mode(cli: &Cli, renderer: &Renderer, journal: &Journal) -> Result<CliModeResult> {
    if cli.all {
        renderer.print_entries(&journal.all_entries());
        return Ok(CliModeResult::Finish);
    }

    let Some(token) = cli.on.as_deref() else {
        return Ok(CliModeResult::NothingToDo);
    };
    let date = resolve_date(journal, token)?;
    match journal.find_entry(date) {
        Some(entry) => renderer.print_entry(&entry),
        None => renderer.print_info(&format!("No journal entry for {date}.")),
    }
    Ok(CliModeResult::Finish)
}
