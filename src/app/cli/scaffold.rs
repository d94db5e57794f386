//! scaffold build / teardown / nuke commands.

use std::path::Path;

use clap::Subcommand;

use crate::app::api;
use crate::domain::AppError;

#[derive(Subcommand)]
pub enum ScaffoldCommands {
    /// Render templates, copy statics and run the manifest
    #[clap(visible_alias = "b")]
    Build {
        /// Service name
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        service: Option<String>,
        /// Build the global scaffold and every enabled service
        #[arg(long)]
        all: bool,
    },
    /// Remove the generated env file, keeping configuration
    Teardown {
        /// Service name
        service: String,
    },
    /// Remove the generated env file and the whole configuration tree
    Nuke {
        /// Service name
        service: String,
    },
}

pub(super) fn run_scaffold(base_dir: &Path, command: ScaffoldCommands) -> Result<(), AppError> {
    match command {
        ScaffoldCommands::Build { service: Some(service), .. } => {
            let outcome = api::scaffold_build(base_dir, &service)?;
            if outcome.nothing_to_do {
                println!("ℹ️ Nothing to scaffold for '{}'", service);
            } else {
                println!("✅ Built scaffold for '{}'", service);
            }
            Ok(())
        }
        ScaffoldCommands::Build { service: None, .. } => {
            let outcomes = api::scaffold_build_all(base_dir)?;
            println!("✅ Built {} scaffold(s)", outcomes.len());
            Ok(())
        }
        ScaffoldCommands::Teardown { service } => {
            let outcome = api::scaffold_teardown(base_dir, &service, true)?;
            println!("✅ Tore down '{}' ({} path(s) removed)", service, outcome.removed.len());
            Ok(())
        }
        ScaffoldCommands::Nuke { service } => {
            let outcome = api::scaffold_teardown(base_dir, &service, false)?;
            println!("✅ Nuked '{}' ({} path(s) removed)", service, outcome.removed.len());
            Ok(())
        }
    }
}
