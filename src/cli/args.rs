use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blockforge",
    about = "Block component registry client",
    long_about = "Manage remotely-hosted block component repositories and sync \
the published catalogue into typed generated exports",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the registry and regenerate the blocks package exports
    Sync {
        /// Preview what would be generated without writing files
        #[arg(long)]
        dry_run: bool,

        /// Directory to probe for the blocks package (default: cwd)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show registry counts and per-author components
    Info,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
