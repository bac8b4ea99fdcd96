mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli_modes::{CliModeResult, calendar_mode, edit_mode, migrate_mode, read_mode, write_mode};
use gj_core::Journal;
use render::{RenderOptions, Renderer, use_color};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type CliMode = fn(&Cli, &Renderer, &Journal) -> Result<CliModeResult>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gj: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `GJ_LOG` (e.g. `GJ_LOG=debug`). Warnings by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("GJ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let journal = Journal::new()?;
    debug!(location = %journal.location(), today = %journal.today(), "journal opened");
    let renderer = Renderer::new(Some(RenderOptions {
        date_format: journal.config.date_format.clone(),
        use_color: use_color(cli.color),
        short_mode: cli.short_mode(),
    }));

    if cli.path {
        renderer.print_info(&journal.location());
        return Ok(());
    }
    if cli.migrate {
        migrate_mode(&renderer, &journal)?;
        return Ok(());
    }

    // Edit mode comes last: with no other flag it edits today's entry.
    let modes: [CliMode; 4] = [write_mode, read_mode, calendar_mode, edit_mode];
    for mode in modes {
        if let CliModeResult::Finish = mode(cli, &renderer, &journal)? {
            break;
        }
    }
    Ok(())
}
