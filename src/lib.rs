pub mod cli;
pub mod codegen;
pub mod commands;
pub mod config;
pub mod error;
pub mod project_identity;
pub mod registry;
pub mod ui;

use clap::Parser;
use std::process::exit;

/// Run the blockforge CLI entrypoint.
pub fn run_cli() {
    ui::init_colors();

    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
