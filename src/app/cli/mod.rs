//! CLI Adapter.

mod scaffold;
mod services;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::domain::AppError;
use crate::domain::layout::DEFAULT_BASE_DIR;

#[derive(Parser)]
#[command(name = "homelab")]
#[command(version)]
#[command(
    about = "Enable Docker Compose homelab services and scaffold their configuration",
    long_about = None
)]
struct Cli {
    /// Installation base directory
    #[arg(long, global = true, env = "HOMELAB_BASE_DIR", default_value = DEFAULT_BASE_DIR)]
    base_dir: PathBuf,
    /// Answer every prompt with its default
    #[arg(long, global = true)]
    non_interactive: bool,
    /// Show debug diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enable services together with their dependencies
    #[clap(visible_alias = "e")]
    Enable {
        /// Service name(s)
        #[arg(required = true)]
        services: Vec<String>,
    },
    /// Disable a service and archive its env file
    #[clap(visible_alias = "d")]
    Disable {
        /// Service name
        service: String,
    },
    /// List available services
    #[clap(visible_alias = "ls")]
    List {
        /// Only show enabled services
        #[arg(long)]
        enabled: bool,
    },
    /// Build or remove service scaffolds
    Scaffold {
        #[command(subcommand)]
        command: scaffold::ScaffoldCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_dir = cli.base_dir;
    let result: Result<(), AppError> = match cli.command {
        Commands::Enable { services } => {
            services::run_enable(&base_dir, &services, cli.non_interactive)
        }
        Commands::Disable { service } => services::run_disable(&base_dir, &service),
        Commands::List { enabled } => services::run_list(&base_dir, enabled),
        Commands::Scaffold { command } => scaffold::run_scaffold(&base_dir, command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let layer =
        fmt::layer().compact().without_time().with_target(false).with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry().with(layer).with(filter).try_init();
}
