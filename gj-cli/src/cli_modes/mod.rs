mod calendar_mode;
mod cli_mode;
mod edit_mode;
mod editor_utils;
mod migrate_mode;
mod read_mode;
mod write_mode;

pub use calendar_mode::calendar_mode;
pub use cli_mode::{CliModeResult, resolve_date};
pub use edit_mode::edit_mode;
pub use migrate_mode::migrate_mode;
pub use read_mode::read_mode;
pub use write_mode::write_mode;
