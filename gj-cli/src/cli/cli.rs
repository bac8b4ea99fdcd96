use clap::{ArgGroup, Parser};

use crate::render::ColorMode;

use super::style::Style;

/// gj — Daily gratitude journal
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("write_mode").args(["gratitude", "connections", "goals"]).multiple(true)),
    group(ArgGroup::new("browse_mode").args(["calendar", "all", "edit"]).multiple(false)),
)]
pub struct Cli {
    /// Prints where the journal is stored
    #[arg(long, short, exclusive = true)]
    pub path: bool,
    /// Copies entries saved in the old gratefulFor/peopleAppreciate/toDoToday
    /// format into the journal. Days already in the journal are left alone.
    #[arg(long, exclusive = true)]
    pub migrate: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Output style: "long" or "short". Short style only shows the date and how many slots are filled.
    #[arg(long, short, value_enum, env = "GJ_STYLE", default_value_t = Style::Long)]
    pub style: Style,
    /// Same as `--style short`.
    #[arg(long)]
    pub short: bool,

    /// Things you are grateful for, up to three (e.g. `gj -g "sun" "coffee"`).
    /// Use "" to leave a slot empty.
    #[arg(long, short = 'g', num_args(1..=3), value_name = "ITEM", conflicts_with = "browse_mode")]
    pub gratitude: Option<Vec<String>>,
    /// People you want to connect with, up to three.
    #[arg(long, short = 'c', num_args(1..=3), value_name = "ITEM", conflicts_with = "browse_mode")]
    pub connections: Option<Vec<String>>,
    /// Actions you will take, up to three.
    #[arg(long, short = 'o', num_args(1..=3), value_name = "ITEM", conflicts_with = "browse_mode")]
    pub goals: Option<Vec<String>>,

    /// The day to write to, or to view when no list is given
    /// (e.g. `gj --on yesterday`, `gj --on 14/03/2024`).
    #[arg(long, conflicts_with = "browse_mode")]
    pub on: Option<String>,
    /// Opens your $EDITOR on a day's entry (today if no date is given).
    #[arg(long, short, num_args = 0..=1, default_missing_value = "today", value_name = "DATE")]
    pub edit: Option<String>,

    /// Shows a month calendar (e.g. `gj --calendar`, `gj --calendar 2024-03`, `gj --calendar "last month"`).
    #[arg(long, num_args = 0..=1, default_missing_value = "this month", value_name = "MONTH")]
    pub calendar: Option<String>,
    /// Moves the calendar this many months forward (negative: back).
    #[arg(long, requires = "calendar", allow_negative_numbers = true, value_name = "MONTHS")]
    pub shift: Option<i32>,
    /// Selects a day in the calendar and shows its entry.
    #[arg(long, requires = "calendar", value_name = "DATE")]
    pub select: Option<String>,

    /// Lists every entry, oldest first.
    #[arg(long, short)]
    pub all: bool,
}

impl Cli {
    /// `--short` wins over `--style` and `GJ_STYLE`.
    pub fn short_mode(&self) -> bool {
        self.short || self.style == Style::Short
    }

    /// `(category, items)` for every list given on the command line.
    pub fn list_updates(&self) -> Vec<(gj_core::Category, Vec<String>)> {
        use gj_core::Category;
        [
            (Category::Gratitude, &self.gratitude),
            (Category::Connections, &self.connections),
            (Category::Goals, &self.goals),
        ]
        .into_iter()
        .filter_map(|(category, items)| items.clone().map(|items| (category, items)))
        .collect()
    }
}
