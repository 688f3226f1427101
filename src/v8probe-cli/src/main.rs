mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            kind,
            handle,
            dumps,
            image,
            image_base,
            grammar,
        } => {
            commands::resolve(kind, &handle, &dumps, image, &image_base, grammar)?;
        }

        Commands::Dump { handle, dumps } => {
            commands::dump(&handle, &dumps)?;
        }

        Commands::Identity {
            handle,
            image,
            image_base,
        } => {
            commands::identity(&handle, &image, &image_base)?;
        }
    }

    Ok(())
}
