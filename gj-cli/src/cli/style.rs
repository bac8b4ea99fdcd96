use clap::ValueEnum;

/// How much of each entry is printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Every filled slot, grouped by category.
    Long,
    /// One line per day with filled-slot counts.
    Short,
}
