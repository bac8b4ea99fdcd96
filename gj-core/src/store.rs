//! Date-keyed persistence of a whole [`EntryCollection`] under one storage key.
//!
//! Every save is a full read-modify-write of the collection. Nothing
//! coordinates two processes saving at once: the last write wins.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dates::parse_date_key;
use crate::entry::{Entry, EntryCollection, LegacyCollection};
use crate::storage::Storage;

/// Outcome of merging a legacy collection into the canonical one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Date keys copied into the canonical collection.
    pub migrated: Vec<String>,
    /// Date keys left alone because the canonical collection already had them.
    pub skipped: Vec<String>,
    /// Legacy keys that are not `YYYY-MM-DD` dates.
    pub invalid: Vec<String>,
}

#[derive(Debug)]
pub struct EntryStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> EntryStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn location(&self) -> String {
        self.storage.location(&self.key)
    }

    /// Reads the whole collection.
    ///
    /// A missing blob is an empty journal. An unreadable or undecodable blob
    /// is also treated as empty, with a warning logged, so a damaged file
    /// never stops the caller from rendering.
    pub fn load_all(&self) -> EntryCollection {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored entries yet");
                return EntryCollection::new();
            }
            Err(error) => {
                warn!(key = %self.key, error = %format!("{error:#}"), "could not read entries; treating journal as empty");
                return EntryCollection::new();
            }
        };

        self.decode(&raw)
    }

    fn decode(&self, raw: &str) -> EntryCollection {
        match serde_json::from_str::<EntryCollection>(raw) {
            Ok(entries) => {
                debug!(key = %self.key, count = entries.len(), "loaded entries");
                entries
            }
            Err(error) => {
                warn!(
                    key = %self.key,
                    location = %self.location(),
                    %error,
                    "stored entries are not valid JSON; treating journal as empty"
                );
                EntryCollection::new()
            }
        }
    }

    /// Inserts or replaces the entry at `date` and writes the full
    /// collection back. Returns the collection as written.
    ///
    /// A blob that cannot be read at all is an error here, so a file this
    /// process failed to read is never replaced. A blob that reads but does
    /// not decode is treated as empty, like [`load_all`](Self::load_all).
    pub fn upsert(&self, date: NaiveDate, entry: Entry) -> Result<EntryCollection> {
        let raw = self
            .storage
            .get_item(&self.key)
            .with_context(|| format!("reading entries from {}", self.location()))?;
        let mut entries = match raw {
            Some(raw) => self.decode(&raw),
            None => EntryCollection::new(),
        };
        entries.insert(date, entry);
        self.write_all(&entries)?;
        debug!(key = %self.key, %date, count = entries.len(), "saved entry");
        Ok(entries)
    }

    pub fn has(&self, date: NaiveDate) -> bool {
        self.load_all().contains(date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<Entry> {
        self.load_all().get_date(date).cloned()
    }

    /// Copies every record stored under `legacy_key` (legacy schema) into
    /// this store. Dates this store already has are kept. The legacy blob is
    /// never modified.
    pub fn migrate_from(&self, legacy_key: &str) -> Result<MigrationReport> {
        if legacy_key == self.key {
            bail!("legacy key `{legacy_key}` is the same as the journal key");
        }
        let mut report = MigrationReport::default();
        let Some(raw) = self
            .storage
            .get_item(legacy_key)
            .with_context(|| format!("reading {}", self.storage.location(legacy_key)))?
        else {
            debug!(key = legacy_key, "no legacy entries to migrate");
            return Ok(report);
        };
        let legacy: LegacyCollection = serde_json::from_str(&raw)
            .with_context(|| format!("decoding {}", self.storage.location(legacy_key)))?;

        let mut entries = self.load_all();
        for (key, legacy_entry) in legacy {
            let Some(date) = parse_date_key(&key) else {
                report.invalid.push(key);
                continue;
            };
            if entries.contains(date) {
                report.skipped.push(key);
                continue;
            }
            entries.insert(date, Entry::from(legacy_entry));
            report.migrated.push(key);
        }

        if !report.migrated.is_empty() {
            self.write_all(&entries)?;
        }
        debug!(
            from = legacy_key,
            to = %self.key,
            migrated = report.migrated.len(),
            skipped = report.skipped.len(),
            "migrated legacy entries"
        );
        Ok(report)
    }

    fn write_all(&self, entries: &EntryCollection) -> Result<()> {
        let json = serde_json::to_string(entries).context("encoding entries")?;
        self.storage
            .set_item(&self.key, &json)
            .with_context(|| format!("saving entries to {}", self.location()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Category;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::tempdir;

    const KEY: &str = "journalEntries";

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn mem_store() -> EntryStore<MemoryStorage> {
        EntryStore::new(MemoryStorage::new(), KEY)
    }

    #[test]
    fn load_all_on_fresh_store_is_empty() {
        assert!(mem_store().load_all().is_empty());
    }

    #[test]
    fn load_all_on_corrupt_blob_is_empty() {
        let store = EntryStore::new(MemoryStorage::new().with_item(KEY, "{not json"), KEY);
        assert!(store.load_all().is_empty());

        let store = EntryStore::new(MemoryStorage::new().with_item(KEY, "[1, 2, 3]"), KEY);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn upsert_then_load_keeps_empty_slots() {
        let store = mem_store();
        let date = d(2024, 3, 15);
        let mut entry = Entry::new(date);
        entry
            .set_list(
                Category::Gratitude,
                vec!["sun".into(), "coffee".into(), "".into()],
            )
            .unwrap();

        let written = store.upsert(date, entry.clone()).unwrap();
        assert_eq!(written.get("2024-03-15"), Some(&entry));

        let loaded = store.load_all();
        assert_eq!(loaded.get("2024-03-15").unwrap().gratitude, vec!["sun", "coffee", ""]);
        assert_eq!(loaded.get("2024-03-15"), Some(&entry));
    }

    #[test]
    fn upsert_overwrites_same_date_and_keeps_others() {
        let store = mem_store();
        store.upsert(d(2024, 3, 14), Entry::new(d(2024, 3, 14))).unwrap();

        let mut first = Entry::new(d(2024, 3, 15));
        first.set_slot(Category::Goals, 0, "run").unwrap();
        store.upsert(d(2024, 3, 15), first).unwrap();

        let mut second = Entry::new(d(2024, 3, 15));
        second.set_slot(Category::Goals, 0, "swim").unwrap();
        let all = store.upsert(d(2024, 3, 15), second).unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all.get("2024-03-15").unwrap().goals[0], "swim");
    }

    #[test]
    fn upsert_stamps_the_key_into_the_entry() {
        let store = mem_store();
        let entry = Entry::new(d(2000, 1, 1));
        store.upsert(d(2024, 3, 15), entry).unwrap();
        assert_eq!(store.get(d(2024, 3, 15)).unwrap().date, "2024-03-15");
    }

    #[test]
    fn upsert_over_corrupt_blob_starts_fresh() {
        let store = EntryStore::new(MemoryStorage::new().with_item(KEY, "garbage"), KEY);
        let all = store.upsert(d(2024, 3, 15), Entry::new(d(2024, 3, 15))).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn null_list_in_one_record_does_not_cost_other_days() {
        let seeded = r#"{"2024-03-14":{"date":"2024-03-14","gratitude":["keep me"],"connections":null,"goals":["",""]}}"#;
        let store = EntryStore::new(MemoryStorage::new().with_item(KEY, seeded), KEY);
        assert_eq!(store.load_all().len(), 1);

        let all = store.upsert(d(2024, 3, 15), Entry::new(d(2024, 3, 15))).unwrap();

        assert_eq!(all.len(), 2);
        let kept = store.get(d(2024, 3, 14)).unwrap();
        assert_eq!(kept.gratitude, vec!["keep me"]);
        assert!(kept.connections.is_empty());
    }

    #[test]
    fn upsert_refuses_to_replace_an_unreadable_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(format!("{KEY}.json"));
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let store = EntryStore::new(FileStorage::new(tmp.path()), KEY);

        assert!(store.load_all().is_empty());
        let err = store
            .upsert(d(2024, 3, 15), Entry::new(d(2024, 3, 15)))
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading entries from"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x00]);
    }

    #[test]
    fn has_reflects_upserts_only() {
        let store = mem_store();
        assert!(!store.has(d(2024, 3, 15)));
        store.upsert(d(2024, 3, 15), Entry::new(d(2024, 3, 15))).unwrap();
        assert!(store.has(d(2024, 3, 15)));
        assert!(!store.has(d(2024, 3, 16)));
    }

    #[test]
    fn last_write_wins_between_two_stores() {
        let tmp = tempdir().unwrap();
        let a = EntryStore::new(FileStorage::new(tmp.path()), KEY);
        let b = EntryStore::new(FileStorage::new(tmp.path()), KEY);

        let mut from_a = Entry::new(d(2024, 3, 15));
        from_a.set_slot(Category::Gratitude, 0, "a").unwrap();
        let mut from_b = Entry::new(d(2024, 3, 15));
        from_b.set_slot(Category::Gratitude, 0, "b").unwrap();

        a.upsert(d(2024, 3, 15), from_a).unwrap();
        b.upsert(d(2024, 3, 15), from_b).unwrap();

        assert_eq!(a.get(d(2024, 3, 15)).unwrap().gratitude[0], "b");
    }

    #[test]
    fn upsert_reports_write_failures() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = EntryStore::new(FileStorage::new(&blocker), KEY);
        let err = store
            .upsert(d(2024, 3, 15), Entry::new(d(2024, 3, 15)))
            .unwrap_err();
        assert!(format!("{err:#}").contains("saving entries to"));
    }

    #[test]
    fn migrate_copies_legacy_records_and_keeps_existing_dates() {
        let legacy = r#"{
            "2024-01-01": {"gratefulFor":["tea","",""],"peopleAppreciate":["Mum"],"toDoToday":[],"date":"2024-01-01"},
            "2024-01-02": {"gratefulFor":["old"],"peopleAppreciate":[],"toDoToday":[],"date":"2024-01-02"},
            "someday": {"gratefulFor":["?"]}
        }"#;
        let storage = MemoryStorage::new().with_item("gratitudeEntries", legacy);
        let store = EntryStore::new(storage, KEY);
        let mut kept = Entry::new(d(2024, 1, 2));
        kept.set_slot(Category::Gratitude, 0, "new").unwrap();
        store.upsert(d(2024, 1, 2), kept).unwrap();

        let report = store.migrate_from("gratitudeEntries").unwrap();

        assert_eq!(report.migrated, vec!["2024-01-01"]);
        assert_eq!(report.skipped, vec!["2024-01-02"]);
        assert_eq!(report.invalid, vec!["someday"]);
        let all = store.load_all();
        assert_eq!(all.get("2024-01-01").unwrap().gratitude, vec!["tea", "", ""]);
        assert_eq!(all.get("2024-01-01").unwrap().connections, vec!["Mum"]);
        assert_eq!(all.get("2024-01-02").unwrap().gratitude[0], "new");
        assert_eq!(
            store.storage().get_item("gratitudeEntries").unwrap().as_deref(),
            Some(legacy)
        );
    }

    #[test]
    fn migrate_without_legacy_blob_does_nothing() {
        let store = mem_store();
        let report = store.migrate_from("gratitudeEntries").unwrap();
        assert_eq!(report, MigrationReport::default());
        assert_eq!(store.storage().get_item(KEY).unwrap(), None);
    }

    #[test]
    fn migrate_rejects_corrupt_legacy_blob_and_same_key() {
        let store = EntryStore::new(
            MemoryStorage::new().with_item("gratitudeEntries", "nope"),
            KEY,
        );
        assert!(store.migrate_from("gratitudeEntries").is_err());
        assert!(store.migrate_from(KEY).is_err());
    }
}
