//! newsheat
//!
//! Technology news search ranked by heat, plus file-share link extraction.

mod cli;
mod commands;
mod routes;
mod server;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::{Cli, Commands, LinksCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // stdout carries JSON only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newsheat_services=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => commands::search(args).await,
        Commands::Links(command) => {
            let outcome = match command {
                LinksCommand::Search(args) => commands::link_search(args).await,
                LinksCommand::Extract(args) => commands::link_extract(args).await,
            };
            // Link commands report failures in-band as JSON
            if let Err(e) = outcome {
                commands::print_failure(&format!("{:#}", e));
            }
            Ok(())
        }
        Commands::Serve(args) => server::serve(args).await,
    }
}
