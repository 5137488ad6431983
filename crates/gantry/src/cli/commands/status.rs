//! Status command

use std::path::Path;

use clap::Args;
use console::style;
use tracing::info;

use gantry_core::config::{load_config_or_default, Config};
use gantry_core::error::ChangesetError;
use gantry_core::{pending_changesets, planned_bumps, Changeset};
use gantry_git::GitRepo;

use crate::cli::{output, Cli, OutputFormat};

/// Show pending changesets and the bumps they imply
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    /// Execute the status command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing status command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);

        let changesets = pending_in_repo(&cwd, &config)?;
        let bumps = planned_bumps(&changesets);

        if cli.format == OutputFormat::Json {
            let json = serde_json::json!({
                "changesets": changesets,
                "planned_bumps": bumps,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
            return Ok(());
        }

        if changesets.is_empty() {
            output::info("No pending changesets");
            return Ok(());
        }

        println!(
            "{} pending changeset{}:",
            style(changesets.len()).bold(),
            if changesets.len() == 1 { "" } else { "s" }
        );
        for changeset in &changesets {
            print_changeset(changeset);
        }

        println!();
        println!("Planned bumps:");
        for (package, bump) in &bumps {
            println!("{}", output::key_value(package, &bump.to_string()));
        }

        Ok(())
    }
}

/// Pending changesets for the repository containing `start`.
///
/// The changeset directory lives at the repo root, so discovery has to run
/// even when the command is invoked from a package subdirectory. A missing
/// changeset directory reads as "no pending changesets".
fn pending_in_repo(start: &Path, config: &Config) -> anyhow::Result<Vec<Changeset>> {
    let repo = GitRepo::discover(start)?;
    let dir = repo.path().join(&config.changelog.changeset_directory);
    match pending_changesets(&dir) {
        Ok(changesets) => Ok(changesets),
        Err(ChangesetError::DirectoryNotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn print_changeset(changeset: &Changeset) {
    let packages: Vec<String> = changeset
        .releases
        .iter()
        .map(|(package, bump)| format!("{} ({})", package, bump))
        .collect();
    println!(
        "  {} {}",
        style(&changeset.id).cyan(),
        packages.join(", ")
    );
}
