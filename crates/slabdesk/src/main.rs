// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slabdesk - countertop estimates with automated follow-up reminders.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod sweep;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slabdesk_config::SlabdeskConfig;

/// Slabdesk - countertop estimates with automated follow-up reminders.
#[derive(Parser, Debug)]
#[command(name = "slabdesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API and run the reminder sweeper.
    Serve,
    /// Run one reminder sweep and exit.
    Sweep,
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => slabdesk_config::load_and_validate_path(path),
        None => slabdesk_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            slabdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Sweep) => match sweep::run_sweep(config).await {
            Ok(sent) => println!("sweep complete: {sent} reminder(s) logged"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Config) => {
            if let Err(e) = print_config(&config) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("slabdesk: use --help for available commands");
        }
    }
}

fn print_config(config: &SlabdeskConfig) -> Result<(), toml::ser::Error> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
