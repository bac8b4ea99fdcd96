//! Month-grid projection of the journal.
//!
//! A grid is always 6 weeks of 7 days, Sunday first, starting on the
//! Sunday on or before the first day of the month. Up to 14 of its cells
//! belong to the neighbouring months.

use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::dates::{date_key, get_dates_in_range};
use crate::entry::EntryCollection;

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// A month, held as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

/// `true` if the whole six-week grid of the month starting on `first` can
/// be represented.
fn grid_fits(first: NaiveDate) -> bool {
    let back = first.weekday().num_days_from_sunday();
    first
        .checked_sub_signed(Duration::days(back as i64))
        .and_then(|start| start.checked_add_signed(Duration::days(GRID_CELLS as i64 - 1)))
        .is_some()
}

impl MonthCursor {
    /// `None` for invalid months and for the months at the very edges of
    /// the calendar, whose grid would run past them.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .filter(|first| grid_fits(*first))
            .map(|first| Self { first })
    }

    /// The month `date` falls in, or the nearest month with a full grid
    /// for dates at the edges of the calendar.
    pub fn from_date(date: NaiveDate) -> Self {
        let first = date - Duration::days(date.day0() as i64);
        if grid_fits(first) {
            return Self { first };
        }
        let inward = if first.year() > 0 {
            first.checked_sub_months(Months::new(1))
        } else {
            first.checked_add_months(Months::new(1))
        };
        Self {
            first: inward.unwrap_or(first),
        }
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn prev(self) -> Self {
        self.shift(-1)
    }

    /// Moves `months` months forward (or back, if negative). Stays put when
    /// the target month's grid would not fit in the representable calendar.
    pub fn shift(self, months: i32) -> Self {
        let step = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.first.checked_add_months(step)
        } else {
            self.first.checked_sub_months(step)
        };
        moved
            .filter(|first| grid_fits(*first))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    /// The Sunday on or before the first day of the month.
    pub fn grid_start(self) -> NaiveDate {
        let back = self.first.weekday().num_days_from_sunday();
        self.first - Duration::days(back as i64)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

/// Anything that can answer "is there an entry under this date key?".
pub trait DateKeySet {
    fn contains_date_key(&self, key: &str) -> bool;
}

impl DateKeySet for EntryCollection {
    fn contains_date_key(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl DateKeySet for BTreeSet<String> {
    fn contains_date_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl DateKeySet for HashSet<String> {
    fn contains_date_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// One day of a month grid. Derived on every render, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub date_key: String,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_entry: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub cursor: MonthCursor,
    pub grid_start: NaiveDate,
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// The six weeks of the grid, Sunday to Saturday.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn selected(&self) -> Option<&CalendarCell> {
        self.cells.iter().find(|c| c.is_selected)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.cells.iter().find(|c| c.date == date)
    }

    /// Number of days of the displayed month that have an entry.
    pub fn entries_in_month(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_current_month && c.has_entry)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarProjector {
    /// When set, only days with an entry can be selected.
    pub require_entry_to_select: bool,
}

impl Default for CalendarProjector {
    fn default() -> Self {
        Self {
            require_entry_to_select: true,
        }
    }
}

impl CalendarProjector {
    pub fn new(require_entry_to_select: bool) -> Self {
        Self {
            require_entry_to_select,
        }
    }

    /// Builds the 42-cell grid of `cursor`'s month.
    pub fn project(
        &self,
        cursor: MonthCursor,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        existing: &impl DateKeySet,
    ) -> CalendarGrid {
        let grid_start = cursor.grid_start();
        let grid_end = grid_start + Duration::days(GRID_CELLS as i64 - 1);
        let today_key = date_key(today);
        let selected_key = selected.map(date_key);

        let cells = get_dates_in_range(grid_start, grid_end)
            .into_iter()
            .map(|date| {
                let key = date_key(date);
                CalendarCell {
                    date,
                    is_current_month: cursor.contains(date),
                    is_today: key == today_key,
                    is_selected: selected_key.as_deref() == Some(key.as_str()),
                    has_entry: existing.contains_date_key(&key),
                    date_key: key,
                }
            })
            .collect();

        CalendarGrid {
            cursor,
            grid_start,
            cells,
        }
    }

    /// Whether a day may become the selection.
    pub fn can_select(&self, date: NaiveDate, existing: &impl DateKeySet) -> bool {
        !self.require_entry_to_select || existing.contains_date_key(&date_key(date))
    }
}

/// Render-local state of a calendar browser: the displayed month and the
/// selected day.
#[derive(Debug, Clone)]
pub struct CalendarView {
    cursor: MonthCursor,
    selected: Option<NaiveDate>,
    projector: CalendarProjector,
}

impl CalendarView {
    pub fn new(cursor: MonthCursor, projector: CalendarProjector) -> Self {
        Self {
            cursor,
            selected: None,
            projector,
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn shift(&mut self, months: i32) {
        self.cursor = self.cursor.shift(months);
    }

    /// Selects `date` if the projector allows it. Returns whether the
    /// selection changed; an inert day leaves the previous selection alone.
    pub fn select(&mut self, date: NaiveDate, existing: &impl DateKeySet) -> bool {
        if !self.projector.can_select(date, existing) {
            return false;
        }
        self.selected = Some(date);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn grid(&self, today: NaiveDate, existing: &impl DateKeySet) -> CalendarGrid {
        self.projector
            .project(self.cursor, today, self.selected, existing)
    }
}
