use super::theme::OneDark;
use gj_core::{
    CalendarGrid, Entry, EntryCollection, MigrationReport, SavedEntry,
    render::{format_calendar, format_entry, format_entry_line},
};
use regex::Regex;
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%A, %d %B %Y".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    /// Markdown through the skin when colors are on, raw otherwise.
    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
            if !md.ends_with('\n') {
                println!();
            }
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_entry_line(&self, entry: &Entry) {
        let line = format_entry_line(entry);
        if self.opts.use_color {
            let (date, counts) = line.split_at(entry.date.len());
            println!("{}{}", date.with(OneDark::CYAN), counts.with(OneDark::FG));
        } else {
            println!("{line}");
        }
    }

    pub fn print_entry(&self, entry: &Entry) {
        if self.opts.short_mode {
            self.print_entry_line(entry);
            return;
        }
        let md = format_entry(entry, &self.opts.date_format);
        self.print_md(&highlight_mentions(&md));
    }

    pub fn print_saved(&self, saved: &SavedEntry) {
        self.print_info(&format!(
            "Entry saved to {} ({} days in journal).",
            saved.location, saved.total
        ));
        self.print_entry_line(&saved.entry);
    }

    pub fn print_entries(&self, entries: &EntryCollection) {
        if entries.is_empty() {
            self.print_info("No entries found.");
            return;
        }
        self.print_info(&format!("{} entries found.", entries.len()));
        for (i, (_, entry)) in entries.iter().enumerate() {
            if self.opts.short_mode {
                self.print_entry_line(entry);
                continue;
            }
            if i > 0 {
                self.print_md("---");
            }
            self.print_entry(entry);
        }
    }

    pub fn print_calendar(&self, grid: &CalendarGrid) {
        self.print_md(&format_calendar(grid));
        let count = grid.entries_in_month();
        let noun = if count == 1 { "entry" } else { "entries" };
        self.print_info(&format!("{count} {noun} this month."));
    }

    pub fn print_migration(&self, report: &MigrationReport, from: &str) {
        self.print_info(&format!(
            "Migrated {} entries from {from} ({} already in the journal, {} unreadable).",
            report.migrated.len(),
            report.skipped.len(),
            report.invalid.len(),
        ));
        if !report.skipped.is_empty() {
            self.print_md(&format!("Kept existing: {}", report.skipped.join(", ")));
        }
        if !report.invalid.is_empty() {
            self.print_md(&format!("Not a date: {}", report.invalid.join(", ")));
        }
    }
}

/// Wraps `@name` mentions in inline code so the skin highlights them.
fn highlight_mentions(md: &str) -> String {
    let Ok(re) = Regex::new(r"(?m)(^|\s)@([A-Za-z0-9_][\w-]*)") else {
        return md.to_string();
    };
    re.replace_all(md, "$1`@$2`").to_string()
}
