use super::CliModeResult;
use crate::render::Renderer;
use anyhow::{Context, Result};
use gj_core::Journal;

pub fn migrate_mode(renderer: &Renderer, journal: &Journal) -> Result<CliModeResult> {
    let from = journal.config.legacy_storage_key.as_str();
    let report = journal
        .migrate()
        .with_context(|| format!("migrating entries from {from}"))?;
    renderer.print_migration(&report, from);
    Ok(CliModeResult::Finish)
}
