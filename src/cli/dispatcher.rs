//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::error::Result;

pub fn dispatch(args: &Cli) -> Result<()> {
    match &args.command {
        Command::Sync { dry_run, dir } => commands::sync::run(commands::sync::SyncOptions {
            root: dir.clone(),
            dry_run: *dry_run,
        }),
        Command::Info => commands::info::run(),
        Command::Completions { shell } => commands::completions::run(*shell),
    }
}
