//! CLI commands

mod completions;
mod init;
mod publish;
mod status;
mod version;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use publish::PublishCommand;
pub use status::StatusCommand;
pub use version::VersionCommand;

use gantry_core::command_available;

/// Fail fast when a configured external command's program cannot be
/// resolved on PATH, before any branch or tag state is touched.
pub(crate) fn ensure_command_available(kind: &str, command: &str) -> anyhow::Result<()> {
    if !command_available(command) {
        anyhow::bail!("{} command '{}' is not available on PATH", kind, command);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_command_available() {
        assert!(ensure_command_available("version", "echo hi").is_ok());
        assert!(
            ensure_command_available("version", "definitely-not-a-real-binary-xyz").is_err()
        );
    }
}
