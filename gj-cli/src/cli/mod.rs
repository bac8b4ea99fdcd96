mod cli;
mod style;

pub use cli::Cli;

