mod commands;
mod manifest;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "BINDABLE_LOG";

#[derive(Parser)]
#[command(
    name = "bindable",
    about = "Detect custom resource definitions that act as bindable services",
    version
)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log rule evaluation to stderr (BINDABLE_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether each resource in the given manifests is bindable
    Check {
        /// Manifest files (JSON or YAML, `-` for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Exit with status 2 if any resource is not bindable
        #[arg(long)]
        fail_if_not_bindable: bool,
    },

    /// List the binding annotations of each resource
    Annotations {
        /// Manifest files (JSON or YAML, `-` for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            files,
            fail_if_not_bindable,
        } => commands::check::run(&files, cli.json).map(|all_bindable| {
            if fail_if_not_bindable && !all_bindable {
                2
            } else {
                0
            }
        }),
        Commands::Annotations { files } => commands::annotations::run(&files, cli.json).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
