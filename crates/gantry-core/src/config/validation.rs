//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_commands(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    if config.git.base_branch.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.base_branch".to_string(),
            message: "base branch cannot be empty".to_string(),
        }
        .into());
    }

    if config.git.release_branch_prefix.is_empty()
        || config.git.release_branch_prefix.contains(' ')
    {
        return Err(ConfigError::InvalidValue {
            field: "git.release_branch_prefix".to_string(),
            message: "must be a non-empty branch name fragment".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_commands(config: &Config) -> Result<()> {
    if config.version.command.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "version.command".to_string(),
            message: "version command cannot be empty".to_string(),
        }
        .into());
    }

    if config.publish.command.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "publish.command".to_string(),
            message: "publish command cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file_name.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file_name".to_string(),
            message: "file name cannot be empty".to_string(),
        }
        .into());
    }

    if let Some(formatter) = &config.changelog.formatter {
        if formatter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "changelog.formatter".to_string(),
                message: "formatter command cannot be empty when set".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_remote_rejected() {
        let mut config = Config::default();
        config.git.remote = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_version_command_rejected() {
        let mut config = Config::default();
        config.version.command = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_formatter_rejected() {
        let mut config = Config::default();
        config.changelog.formatter = Some("".to_string());
        assert!(validate_config(&config).is_err());
    }
}
