use anyhow::{Context, Result, bail};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use regex::Regex;
use strum::IntoEnumIterator;

use crate::calendar::MonthCursor;
use crate::entry::{Category, ENTRY_SLOTS, Entry};
use crate::keywords::{Keyword, Keywords};

/// Default accepted input date formats (parsing only).
pub const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Configuration options for parsing functions.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions<'a> {
    /// The date to use as "today" for relative keywords.
    pub reference_date: Option<NaiveDate>,
    /// A slice of `chrono` format strings to try for parsing dates.
    pub formats: Option<&'a [&'a str]>,
}

/// Parses a string token into a calendar date.
///
/// Understands, in order:
/// 1.  **Relative keywords**: `today`, `yesterday`, `tomorrow` and any
///     user-defined synonyms, resolved against the reference date.
/// 2.  **Weekday names**: the most recent such day, today included.
/// 3.  **Formatted dates**: any format string in `formats`.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use gj_core::parse_input::{parse_date_token, ParseOptions};
/// let opts = ParseOptions {
///     reference_date: Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
///     formats: Some(&["%Y-%m-%d"]),
/// };
///
/// let yesterday = parse_date_token("yesterday", Some(opts)).unwrap();
/// assert_eq!(yesterday, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
///
/// let specific = parse_date_token("2024-01-20", Some(opts)).unwrap();
/// assert_eq!(specific, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
/// ```
pub fn parse_date_token(s: &str, options: Option<ParseOptions>) -> Option<NaiveDate> {
    let options = options.unwrap_or_default();
    let reference_date = options
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let formats = options.formats.unwrap_or(DEFAULT_FORMATS);
    let s = s.trim();

    match Keywords::lookup(s) {
        Some(Keyword::Today) => return Some(reference_date),
        Some(Keyword::Yesterday) => return Some(reference_date - Duration::days(1)),
        Some(Keyword::Tomorrow) => return Some(reference_date + Duration::days(1)),
        Some(keyword) => {
            if let Some(weekday) = weekday_of(keyword) {
                let today_wd = reference_date.weekday();
                let days_ago =
                    (today_wd.num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
                return Some(reference_date - Duration::days(days_ago as i64));
            }
        }
        None => {}
    }

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parses a month token into a [`MonthCursor`].
///
/// Accepts `this month`, `last month`, `next month` (and synonyms),
/// `YYYY-MM`, `MM/YYYY`, and anything [`parse_date_token`] accepts (the
/// month that date falls in).
///
/// ```
/// # use chrono::NaiveDate;
/// # use gj_core::parse_input::{parse_month_token, ParseOptions};
/// let opts = ParseOptions {
///     reference_date: Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
///     ..Default::default()
/// };
/// let next = parse_month_token("next month", Some(opts)).unwrap();
/// assert_eq!(next.to_string(), "2024-02");
/// assert_eq!(parse_month_token("03/2024", Some(opts)).unwrap().to_string(), "2024-03");
/// ```
pub fn parse_month_token(s: &str, options: Option<ParseOptions>) -> Option<MonthCursor> {
    let opts = options.unwrap_or_default();
    let reference_date = opts
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let current = MonthCursor::from_date(reference_date);
    let s = s.trim();

    match Keywords::lookup(s) {
        Some(Keyword::ThisMonth) => return Some(current),
        Some(Keyword::LastMonth) => return Some(current.prev()),
        Some(Keyword::NextMonth) => return Some(current.next()),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(MonthCursor::from_date(date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("01/{s}"), "%d/%m/%Y") {
        return Some(MonthCursor::from_date(date));
    }

    parse_date_token(s, Some(opts)).map(MonthCursor::from_date)
}

fn weekday_of(keyword: Keyword) -> Option<Weekday> {
    match keyword {
        Keyword::Monday => Some(Weekday::Mon),
        Keyword::Tuesday => Some(Weekday::Tue),
        Keyword::Wednesday => Some(Weekday::Wed),
        Keyword::Thursday => Some(Weekday::Thu),
        Keyword::Friday => Some(Weekday::Fri),
        Keyword::Saturday => Some(Weekday::Sat),
        Keyword::Sunday => Some(Weekday::Sun),
        _ => None,
    }
}

/// Reads back an editor buffer produced by
/// [`format_entry_template`](crate::render::format_entry_template).
///
/// The buffer is a sequence of `## <Category>` sections. Inside a section:
/// - `N. text` writes slot `N` (1-based, `N. ` alone leaves it empty),
/// - `- text`, `* text` or plain text fills the next unused slot,
/// - lines starting with `>` and blank lines are ignored.
///
/// Sections that are missing leave their list empty. Text before the first
/// section, unknown headings and more than three items per list are errors.
pub fn parse_entry_template(input: &str, date: NaiveDate) -> Result<Entry> {
    let numbered = Regex::new(r"^(\d+)[.)]\s*(.*)$").context("compiling item pattern")?;
    let mut entry = Entry::new(date);
    let mut current: Option<Category> = None;
    let mut used = [false; ENTRY_SLOTS];

    for (n, raw_line) in input.lines().enumerate() {
        let line_no = n + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('>') {
            continue;
        }

        if let Some(heading) = line.strip_prefix('#') {
            let name = heading.trim_start_matches('#').trim();
            let Some(category) = Category::iter().find(|c| c.heading().eq_ignore_ascii_case(name))
            else {
                bail!("line {line_no}: unknown section `{name}`");
            };
            current = Some(category);
            used = [false; ENTRY_SLOTS];
            continue;
        }

        let Some(category) = current else {
            bail!("line {line_no}: text outside of a section");
        };

        let (rank, text) = if let Some(caps) = numbered.captures(line) {
            let number: usize = caps[1]
                .parse()
                .with_context(|| format!("line {line_no}: bad item number"))?;
            if number == 0 || number > ENTRY_SLOTS {
                bail!(
                    "line {line_no}: {} only has slots 1 to {ENTRY_SLOTS}",
                    category.heading()
                );
            }
            (number - 1, caps[2].trim().to_string())
        } else {
            let text = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .unwrap_or(line)
                .trim()
                .to_string();
            let Some(free) = used.iter().position(|taken| !taken) else {
                bail!(
                    "line {line_no}: {} takes at most {ENTRY_SLOTS} items",
                    category.heading()
                );
            };
            (free, text)
        };

        entry.set_slot(category, rank, &text)?;
        used[rank] = true;
    }

    Ok(entry)
}
