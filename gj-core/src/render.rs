//! Pure Markdown rendering helpers.
//!
//! Day view:
//!   # Friday, 15 March 2024
//!
//!   ## Gratitude
//!   1. sun
//!   2. coffee
//!
//! Calendar: a Markdown table, one row per week, Sunday first.

use chrono::NaiveDate;
use strum::IntoEnumIterator;

use crate::calendar::{CalendarCell, CalendarGrid, MonthCursor};
use crate::entry::{Category, ENTRY_SLOTS, Entry};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// `# Friday, 15 March 2024`
pub fn format_day_header(date: NaiveDate, date_format: &str) -> String {
    format!("# {}", format_date(date, date_format))
}

/// Formats a date according to the user's configuration.
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// `March 2024`
pub fn format_month_title(cursor: MonthCursor) -> String {
    cursor.first_day().format("%B %Y").to_string()
}

/// The full day view. Empty slots are skipped but keep their rank number;
/// a category with nothing written is left out.
pub fn format_entry(entry: &Entry, date_format: &str) -> String {
    let header = match entry.parsed_date() {
        Some(date) => format_day_header(date, date_format),
        None => format!("# {}", entry.date),
    };
    let mut out = format!("{header}\n");
    for category in Category::iter() {
        let items: Vec<_> = entry.filled(category).collect();
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n", category.heading()));
        for (rank, item) in items {
            out.push_str(&format!("{}. {}\n", rank + 1, item.trim()));
        }
    }
    if entry.is_blank() {
        out.push_str("\nNothing written for this day.\n");
    }
    out
}

/// One line per entry: `2024-03-15  gratitude 2/3 · connections 0/3 · goals 1/3`
pub fn format_entry_line(entry: &Entry) -> String {
    let counts: Vec<String> = Category::iter()
        .map(|c| {
            format!(
                "{} {}/{}",
                c.as_ref(),
                entry.filled(c).count(),
                entry.list(c).len().max(ENTRY_SLOTS)
            )
        })
        .collect();
    format!("{}  {}", entry.date, counts.join(" · "))
}

/// The buffer handed to `$EDITOR`. Parsed back by
/// [`parse_entry_template`](crate::parse_input::parse_entry_template).
pub fn format_entry_template(entry: &Entry) -> String {
    let mut out = String::new();
    for category in Category::iter() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("## {}\n> {}\n", category.heading(), category.prompt()));
        let list = entry.list(category);
        for rank in 0..ENTRY_SLOTS {
            let item = list.get(rank).map(|s| s.trim()).unwrap_or_default();
            if item.is_empty() {
                out.push_str(&format!("{}.\n", rank + 1));
            } else {
                out.push_str(&format!("{}. {}\n", rank + 1, item));
            }
        }
    }
    out
}

/// Text of a single calendar cell.
///
/// - `**15**` the day has an entry
/// - `[15]` today
/// - `>15<` selected
/// - `·3` a day of the previous or next month
pub fn format_calendar_cell(cell: &CalendarCell) -> String {
    let mut text = cell.date.format("%-d").to_string();
    if !cell.is_current_month {
        text = format!("·{text}");
    }
    if cell.has_entry {
        text = format!("**{text}**");
    }
    if cell.is_today {
        text = format!("[{text}]");
    }
    if cell.is_selected {
        text = format!(">{text}<");
    }
    text
}

/// The month grid as a Markdown table, titled with the month name.
pub fn format_calendar(grid: &CalendarGrid) -> String {
    let mut out = format!("## {}\n\n", format_month_title(grid.cursor));
    out.push_str(&format!("|{}|\n", WEEKDAY_LABELS.join("|")));
    out.push_str(&format!("|{}\n", ":-:|".repeat(WEEKDAY_LABELS.len())));
    for week in grid.weeks() {
        let row: Vec<String> = week.iter().map(format_calendar_cell).collect();
        out.push_str(&format!("|{}|\n", row.join("|")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarProjector;
    use crate::parse_input::parse_entry_template;
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn header_formats_readably() {
        let s = format_day_header(d(2024, 3, 15), "%A, %d %B %Y");
        assert_eq!(s, "# Friday, 15 March 2024");
    }

    #[test]
    fn entry_skips_empty_slots_and_categories() {
        let mut e = Entry::new(d(2024, 3, 15));
        e.set_list(Category::Gratitude, vec!["sun".into(), "".into(), "tea".into()])
            .unwrap();
        let s = format_entry(&e, "%d/%m/%Y");
        assert_eq!(s, "# 15/03/2024\n\n## Gratitude\n1. sun\n3. tea\n");
    }

    #[test]
    fn blank_entry_says_so() {
        let s = format_entry(&Entry::new(d(2024, 3, 15)), "%Y-%m-%d");
        assert!(s.ends_with("Nothing written for this day.\n"));
    }

    #[test]
    fn entry_line_counts_filled_slots() {
        let mut e = Entry::new(d(2024, 3, 15));
        e.set_slot(Category::Goals, 2, "run").unwrap();
        assert_eq!(
            format_entry_line(&e),
            "2024-03-15  gratitude 0/3 · connections 0/3 · goals 1/3"
        );
    }

    #[test]
    fn template_parses_back_to_the_same_lists() {
        let mut e = Entry::new(d(2024, 3, 15));
        e.set_list(Category::Gratitude, vec!["sun".into(), "coffee".into()])
            .unwrap();
        e.set_list(Category::Connections, vec!["".into(), "Ana".into()])
            .unwrap();
        let template = format_entry_template(&e);
        assert!(template.starts_with("## Gratitude\n> What three things"));
        assert_eq!(parse_entry_template(&template, d(2024, 3, 15)).unwrap(), e);
    }

    #[test]
    fn calendar_cells_carry_markers() {
        let cursor = MonthCursor::new(2024, 3).unwrap();
        let keys: BTreeSet<String> = ["2024-03-15".to_string()].into();
        let grid = CalendarProjector::default().project(
            cursor,
            d(2024, 3, 15),
            Some(d(2024, 3, 15)),
            &keys,
        );
        assert_eq!(format_calendar_cell(&grid.cells[0]), "·25");
        assert_eq!(format_calendar_cell(&grid.cells[5]), "1");
        assert_eq!(
            format_calendar_cell(grid.cell(d(2024, 3, 15)).unwrap()),
            ">[**15**]<"
        );
    }

    #[test]
    fn calendar_is_a_six_week_table() {
        let cursor = MonthCursor::new(2024, 3).unwrap();
        let grid = CalendarProjector::default().project(
            cursor,
            d(2024, 3, 1),
            None,
            &BTreeSet::<String>::new(),
        );
        let s = format_calendar(&grid);
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines[0], "## March 2024");
        assert_eq!(lines[2], "|Sun|Mon|Tue|Wed|Thu|Fri|Sat|");
        assert_eq!(lines[3], "|:-:|:-:|:-:|:-:|:-:|:-:|:-:|");
        assert_eq!(lines.len(), 4 + 6);
        assert_eq!(lines[4], "|·25|·26|·27|·28|·29|[1]|2|");
    }
}
