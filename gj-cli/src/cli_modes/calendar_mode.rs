use super::{CliModeResult, resolve_date};
use crate::{Cli, render::Renderer};
use anyhow::{Result, anyhow};
use gj_core::Journal;

/// `gj --calendar [MONTH] [--shift N] [--select DATE]`
pub fn calendar_mode(cli: &Cli, renderer: &Renderer, journal: &Journal) -> Result<CliModeResult> {
    let Some(month) = cli.calendar.as_deref() else {
        return Ok(CliModeResult::NothingToDo);
    };
    let cursor = journal
        .parse_month(month)
        .ok_or_else(|| anyhow!("Could not process '{month}': Not a valid month or keyword."))?;

    let entries = journal.all_entries();
    let mut view = journal.calendar_view(cursor);
    if let Some(months) = cli.shift {
        view.shift(months);
    }

    let mut inert = None;
    if let Some(token) = cli.select.as_deref() {
        let date = resolve_date(journal, token)?;
        if !view.select(date, &entries) {
            inert = Some(date);
        }
    }

    renderer.print_calendar(&view.grid(journal.today(), &entries));

    if let Some(date) = inert {
        renderer.print_info(&format!("No journal entry for {date}."));
    } else if let Some(entry) = view.selected().and_then(|date| entries.get_date(date)) {
        renderer.print_entry(entry);
    } else if let Some(date) = view.selected() {
        renderer.print_info(&format!("No journal entry for {date}."));
    }
    Ok(CliModeResult::Finish)
}
