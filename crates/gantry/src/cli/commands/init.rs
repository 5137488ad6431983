//! Init command

use clap::Args;
use console::style;
use tracing::info;

use gantry_core::config::{default_config_yaml, find_config, DEFAULT_CONFIG_TEMPLATE};

use crate::cli::{output, Cli};

/// Initialize a new Gantry configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,

    /// Write the commented template instead of serialized defaults
    #[arg(long)]
    pub template: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing init command");
        let cwd = std::env::current_dir()?;

        if !self.force {
            if let Some(existing) = find_config(&cwd) {
                anyhow::bail!(
                    "Configuration already exists at {} (use --force to overwrite)",
                    existing.display()
                );
            }
        }

        let path = cwd.join("gantry.yaml");
        let content = if self.template {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        } else {
            default_config_yaml()
        };
        std::fs::write(&path, content)?;

        if !cli.quiet {
            output::success(&format!(
                "Wrote configuration to {}",
                style(path.display()).cyan()
            ));
        }

        Ok(())
    }
}
