//! quadglyph CLI - build curve atlases and layouts from real fonts

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Atlas(args) => commands::atlas::run(args),
        Commands::Layout(args) => commands::layout::run(args),
    }
}
