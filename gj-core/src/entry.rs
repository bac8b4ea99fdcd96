//! The journal record types and their JSON shape.
//!
//! A persisted collection looks like:
//!
//! ```json
//! { "2024-03-15": { "date": "2024-03-15",
//!                   "gratitude": ["sun", "coffee", ""],
//!                   "connections": ["", "", ""],
//!                   "goals": ["", "", ""] } }
//! ```

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::dates::{date_key, parse_date_key};

/// Number of slots every list is created with.
pub const ENTRY_SLOTS: usize = 3;

/// The three lists a day is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Category {
    Gratitude,
    Connections,
    Goals,
}

impl Category {
    pub fn heading(self) -> &'static str {
        match self {
            Category::Gratitude => "Gratitude",
            Category::Connections => "Connections",
            Category::Goals => "Goals",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Category::Gratitude => "What three things are you grateful for today?",
            Category::Connections => "Who would you like to connect with today?",
            Category::Goals => "What three actions will you take today?",
        }
    }
}

/// One day's record.
///
/// Lists that are missing from an older record decode as empty lists, and
/// empty strings inside a list are kept as they are: an empty slot means
/// "nothing for this rank".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gratitude: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connections: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: Vec<String>,
}

/// A field stored as `null` decodes the same as a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Entry {
    /// A blank entry for `date` with [`ENTRY_SLOTS`] empty slots per list.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: date_key(date),
            gratitude: vec![String::new(); ENTRY_SLOTS],
            connections: vec![String::new(); ENTRY_SLOTS],
            goals: vec![String::new(); ENTRY_SLOTS],
        }
    }

    pub fn list(&self, category: Category) -> &[String] {
        match category {
            Category::Gratitude => &self.gratitude,
            Category::Connections => &self.connections,
            Category::Goals => &self.goals,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Gratitude => &mut self.gratitude,
            Category::Connections => &mut self.connections,
            Category::Goals => &mut self.goals,
        }
    }

    /// Replaces a whole list. Shorter inputs are padded with empty slots.
    pub fn set_list(&mut self, category: Category, items: Vec<String>) -> Result<()> {
        if items.len() > ENTRY_SLOTS {
            bail!(
                "{} takes at most {ENTRY_SLOTS} items, got {}",
                category.heading(),
                items.len()
            );
        }
        let list = self.list_mut(category);
        *list = items;
        list.resize(ENTRY_SLOTS, String::new());
        Ok(())
    }

    /// Writes a single slot, growing a short (older) list up to the slot count.
    pub fn set_slot(&mut self, category: Category, rank: usize, value: &str) -> Result<()> {
        if rank >= ENTRY_SLOTS {
            bail!(
                "{} only has {ENTRY_SLOTS} slots (got slot {})",
                category.heading(),
                rank + 1
            );
        }
        let list = self.list_mut(category);
        if list.len() <= rank {
            list.resize(rank + 1, String::new());
        }
        list[rank] = value.to_string();
        Ok(())
    }

    /// Non-empty items of a list, with their zero-based rank.
    pub fn filled(&self, category: Category) -> impl Iterator<Item = (usize, &str)> {
        self.list(category)
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.trim().is_empty())
            .map(|(rank, item)| (rank, item.as_str()))
    }

    /// `true` if every slot of every list is empty.
    pub fn is_blank(&self) -> bool {
        [Category::Gratitude, Category::Connections, Category::Goals]
            .iter()
            .all(|c| self.filled(*c).next().is_none())
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date_key(&self.date)
    }
}

/// The record shape written under the legacy storage key.
///
/// It is only ever read, by the migration into the canonical schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grateful_for: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub people_appreciate: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_do_today: Vec<String>,
}

impl From<LegacyEntry> for Entry {
    fn from(legacy: LegacyEntry) -> Self {
        Entry {
            date: legacy.date,
            gratitude: legacy.grateful_for,
            connections: legacy.people_appreciate,
            goals: legacy.to_do_today,
        }
    }
}

/// All entries of a journal keyed by date key.
///
/// Keys are zero-padded ISO dates, so iteration order is chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryCollection {
    entries: BTreeMap<String, Entry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn get_date(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.get(&date_key(date))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.contains_key(&date_key(date))
    }

    /// Inserts `entry` at `date`, stamping the key into the entry's own
    /// `date` so the two never disagree. Returns the replaced entry, if any.
    pub fn insert(&mut self, date: NaiveDate, mut entry: Entry) -> Option<Entry> {
        let key = date_key(date);
        entry.date = key.clone();
        self.entries.insert(key, entry)
    }

    /// Chronological iteration over `(date key, entry)`.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

/// A mapping in the legacy schema, keyed the same way.
pub type LegacyCollection = BTreeMap<String, LegacyEntry>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_entry_has_three_empty_slots_per_list() {
        let e = Entry::new(d(2024, 3, 15));
        assert_eq!(e.date, "2024-03-15");
        assert_eq!(e.gratitude, vec!["", "", ""]);
        assert_eq!(e.connections.len(), ENTRY_SLOTS);
        assert_eq!(e.goals.len(), ENTRY_SLOTS);
        assert!(e.is_blank());
    }

    #[test]
    fn decode_tolerates_missing_lists() {
        let e: Entry = serde_json::from_str(r#"{"date":"2024-03-15","gratitude":["a"]}"#).unwrap();
        assert_eq!(e.gratitude, vec!["a"]);
        assert!(e.connections.is_empty());
        assert!(e.goals.is_empty());
    }

    #[test]
    fn decode_treats_null_lists_as_missing() {
        let e: Entry = serde_json::from_str(
            r#"{"date":null,"gratitude":["a"],"connections":null,"goals":null}"#,
        )
        .unwrap();
        assert_eq!(e.date, "");
        assert_eq!(e.gratitude, vec!["a"]);
        assert!(e.connections.is_empty());
        assert!(e.goals.is_empty());

        let legacy: LegacyEntry =
            serde_json::from_str(r#"{"gratefulFor":null,"toDoToday":["run"]}"#).unwrap();
        assert!(legacy.grateful_for.is_empty());
        assert_eq!(legacy.to_do_today, vec!["run"]);
    }

    #[test]
    fn encode_keeps_empty_slots_and_field_order() {
        let mut e = Entry::new(d(2024, 3, 15));
        e.set_list(Category::Gratitude, vec!["sun".into(), "coffee".into()])
            .unwrap();
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-03-15","gratitude":["sun","coffee",""],"connections":["","",""],"goals":["","",""]}"#
        );
    }

    #[test]
    fn set_list_rejects_more_than_three_items() {
        let mut e = Entry::new(d(2024, 3, 15));
        let four = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        assert!(e.set_list(Category::Goals, four).is_err());
        assert_eq!(e.goals, vec!["", "", ""]);
    }

    #[test]
    fn set_slot_grows_short_lists() {
        let mut e: Entry = serde_json::from_str(r#"{"date":"2024-03-15"}"#).unwrap();
        e.set_slot(Category::Connections, 1, "Ana").unwrap();
        assert_eq!(e.connections, vec!["", "Ana"]);
        assert!(e.set_slot(Category::Connections, 3, "Bo").is_err());
    }

    #[test]
    fn filled_skips_blank_slots_but_keeps_rank() {
        let mut e = Entry::new(d(2024, 3, 15));
        e.set_list(Category::Goals, vec!["".into(), "run".into(), " ".into()])
            .unwrap();
        let filled: Vec<_> = e.filled(Category::Goals).collect();
        assert_eq!(filled, vec![(1, "run")]);
        assert!(!e.is_blank());
    }

    #[test]
    fn legacy_entry_maps_onto_canonical_lists() {
        let legacy: LegacyEntry = serde_json::from_str(
            r#"{"gratefulFor":["tea"],"peopleAppreciate":["Mum"],"toDoToday":["call"],"date":"2024-01-02"}"#,
        )
        .unwrap();
        let e = Entry::from(legacy);
        assert_eq!(e.date, "2024-01-02");
        assert_eq!(e.gratitude, vec!["tea"]);
        assert_eq!(e.connections, vec!["Mum"]);
        assert_eq!(e.goals, vec!["call"]);
    }

    #[test]
    fn collection_insert_stamps_date_and_iterates_chronologically() {
        let mut c = EntryCollection::new();
        let mut stray = Entry::new(d(1999, 1, 1));
        stray.date = "not a date".into();
        c.insert(d(2024, 3, 15), stray);
        c.insert(d(2023, 12, 31), Entry::new(d(2023, 12, 31)));

        assert_eq!(c.get("2024-03-15").unwrap().date, "2024-03-15");
        let keys: Vec<_> = c.keys().cloned().collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-03-15"]);
        assert!(c.contains(d(2023, 12, 31)));
        assert!(!c.contains_key("2024-03-16"));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(Category::from_str("Goals").unwrap(), Category::Goals);
        assert_eq!(Category::Connections.as_ref(), "connections");
    }
}
