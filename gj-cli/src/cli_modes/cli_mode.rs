use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use gj_core::{Journal, Storage};

/// Whether a mode handled the invocation or the next one should try.
pub enum CliModeResult {
    Finish,
    NothingToDo,
}

/// Resolves a date argument, failing with the token the user typed.
pub fn resolve_date<S: Storage>(journal: &Journal<S>, token: &str) -> Result<NaiveDate> {
    journal
        .parse_date(token)
        .ok_or_else(|| anyhow!("Could not process '{token}': Not a valid date or keyword."))
}
