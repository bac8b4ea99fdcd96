pub mod calendar;
pub mod config;
pub mod dates;
pub mod entry;
pub mod journal;
pub mod keywords;
pub mod parse_input;
pub mod render;
pub mod storage;
pub mod store;

#[cfg(test)]
mod tests;

pub use calendar::{CalendarCell, CalendarGrid, CalendarProjector, CalendarView, MonthCursor};
pub use config::Config;
pub use entry::{Category, ENTRY_SLOTS, Entry, EntryCollection, LegacyEntry};
pub use journal::{Journal, SavedEntry};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{EntryStore, MigrationReport};
