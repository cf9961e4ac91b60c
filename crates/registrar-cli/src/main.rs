//! Registrar CLI - render student, instructor and major reports.

mod cli;
mod commands;
mod table;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    // Library diagnostics are already printed by the commands; RUST_LOG opts into the log stream.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            dir,
            source,
            format,
            only,
            strict,
        } => commands::report::run(dir, source, format, only, strict, cli.verbose),

        Commands::Check { dir, source, json } => {
            commands::check::run(dir, source, json, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
