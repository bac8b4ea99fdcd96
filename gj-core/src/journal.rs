//! The core `Journal` struct, the primary API the CLI talks to.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;

use crate::calendar::{CalendarGrid, CalendarProjector, CalendarView, MonthCursor};
use crate::config::Config;
use crate::entry::{Category, Entry, EntryCollection};
use crate::parse_input::{ParseOptions, parse_date_token, parse_month_token};
use crate::storage::{FileStorage, Storage};
use crate::store::{EntryStore, MigrationReport};

/// A reference to a freshly saved entry.
#[derive(Debug)]
pub struct SavedEntry {
    pub date: NaiveDate,
    pub entry: Entry,
    /// Where the collection was written.
    pub location: String,
    /// Number of days in the journal after the save.
    pub total: usize,
}

/// The central struct for all journal operations.
///
/// Holds the configuration and the [`EntryStore`] every read and write goes
/// through. The store is injected, so tests and embedders can run a journal
/// on [`MemoryStorage`](crate::storage::MemoryStorage).
#[derive(Debug)]
pub struct Journal<S: Storage = FileStorage> {
    pub config: Config,
    store: EntryStore<S>,
}

impl Journal<FileStorage> {
    /// Creates a new `Journal`, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a file-backed `Journal` with a specific `Config`.
    ///
    /// This also ensures that the data directory exists.
    pub fn with_config(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("creating {}", config.data_dir.display()))?;
        let storage = FileStorage::new(&config.data_dir);
        Ok(Self::with_storage(config, storage))
    }
}

impl<S: Storage> Journal<S> {
    pub fn with_storage(config: Config, storage: S) -> Self {
        let store = EntryStore::new(storage, config.storage_key.clone());
        Self { config, store }
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.config.reference_date
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    /// Resolves a date token (`yesterday`, `2024-03-15`, ...) against the
    /// configured formats and reference date.
    pub fn parse_date(&self, token: &str) -> Option<NaiveDate> {
        let formats = self.config.input_formats();
        parse_date_token(token, Some(self.parse_options(&formats)))
    }

    /// Resolves a month token (`last month`, `2024-03`, ...).
    pub fn parse_month(&self, token: &str) -> Option<MonthCursor> {
        let formats = self.config.input_formats();
        parse_month_token(token, Some(self.parse_options(&formats)))
    }

    fn parse_options<'a>(&self, formats: &'a [&'a str]) -> ParseOptions<'a> {
        ParseOptions {
            reference_date: Some(self.config.reference_date),
            formats: Some(formats),
        }
    }

    pub fn all_entries(&self) -> EntryCollection {
        self.store.load_all()
    }

    pub fn find_entry(&self, date: NaiveDate) -> Option<Entry> {
        self.store.get(date)
    }

    pub fn has_entry(&self, date: NaiveDate) -> bool {
        self.store.has(date)
    }

    /// What a form for `date` starts with: the saved entry, or a blank one.
    pub fn draft_for(&self, date: NaiveDate) -> Entry {
        self.find_entry(date).unwrap_or_else(|| Entry::new(date))
    }

    /// Saves `entry` as the record of `date`, replacing any earlier one.
    pub fn save_entry(&self, date: NaiveDate, entry: Entry) -> Result<SavedEntry> {
        let entries = self.store.upsert(date, entry)?;
        let entry = entries
            .get_date(date)
            .cloned()
            .with_context(|| format!("entry for {date} missing after save"))?;
        Ok(SavedEntry {
            date,
            entry,
            location: self.location(),
            total: entries.len(),
        })
    }

    /// Replaces only the given lists of `date`'s entry; the other lists keep
    /// their saved values.
    pub fn update_lists(
        &self,
        date: NaiveDate,
        updates: Vec<(Category, Vec<String>)>,
    ) -> Result<SavedEntry> {
        let mut entry = self.draft_for(date);
        for (category, items) in updates {
            entry.set_list(category, items)?;
        }
        self.save_entry(date, entry)
    }

    /// A calendar browser on `cursor`, configured from `Config`.
    pub fn calendar_view(&self, cursor: MonthCursor) -> CalendarView {
        CalendarView::new(cursor, self.projector())
    }

    /// The grid of `cursor`'s month with `selected` highlighted.
    pub fn calendar(&self, cursor: MonthCursor, selected: Option<NaiveDate>) -> CalendarGrid {
        let entries = self.all_entries();
        self.projector()
            .project(cursor, self.today(), selected, &entries)
    }

    pub fn projector(&self) -> CalendarProjector {
        CalendarProjector::new(self.config.require_entry_to_select)
    }

    /// Moves entries stored under the legacy key into the journal.
    pub fn migrate(&self) -> Result<MigrationReport> {
        self.store.migrate_from(&self.config.legacy_storage_key)
    }
}
