use crate::Config;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(data_dir: PathBuf, reference_date: Option<NaiveDate>) -> Config {
    Config {
        data_dir,
        storage_key: "journalEntries".to_string(),
        legacy_storage_key: "gratitudeEntries".to_string(),
        editor: None,
        date_format: "%A, %d %B %Y".to_string(),
        input_date_formats: ["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()].to_vec(),
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
        require_entry_to_select: true,
    }
}
