mod cli;
mod commands;
mod model;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let command = cli.command.name();
    debug!(command, version = env!("CARGO_PKG_VERSION"), "dispatching");

    if let Err(err) = dispatch(cli.command) {
        error!(command, error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(command, cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Structure(args) => commands::structure::run(args),
        Commands::Headings(args) => commands::headings::run(args),
        Commands::Format(args) => commands::format::run(args),
        Commands::Batch(args) => commands::batch::run(args),
    }
}

// dependencies log at warn unless `RUST_LOG` says otherwise
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,patent_report=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
