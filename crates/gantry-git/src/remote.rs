//! Remote operations
//!
//! Pushes go through the git CLI: credential handling on CI runners (token
//! helpers, ssh agents) works out of the box there, where libgit2 would
//! need explicit callback plumbing.

use std::path::Path;

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use gantry_core::error::GitError;

impl GitRepo {
    /// Get list of remote names
    pub fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes
            .iter()
            .filter_map(|r| r.map(|s| s.to_string()))
            .collect())
    }

    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}

fn run_git_push(cwd: &Path, args: &[&str]) -> Result<()> {
    let start = std::time::Instant::now();
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| GitError::PushFailed(e.to_string()))?;

    info!(
        args = args.join(" "),
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git push (CLI)"
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::PushFailed(stderr.trim().to_string()));
    }

    Ok(())
}

/// Force-push a branch to a remote.
///
/// The release branch is recreated from HEAD on every run, so the remote
/// copy must be overwritten.
#[instrument(fields(remote, branch, cwd = %cwd.display()))]
pub fn git_force_push(cwd: &Path, remote: &str, branch: &str) -> Result<()> {
    run_git_push(cwd, &["push", "--force", remote, branch])
}

/// Push a tag to a remote
#[instrument(fields(remote, tag, cwd = %cwd.display()))]
pub fn git_push_tag(cwd: &Path, remote: &str, tag: &str) -> Result<()> {
    run_git_push(cwd, &["push", remote, &format!("refs/tags/{}", tag)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_remotes_empty() {
        let (_temp, repo) = setup_repo();
        let remotes = repo.remotes().unwrap();
        assert!(remotes.is_empty());
    }

    #[test]
    fn test_remote_not_found() {
        let (_temp, repo) = setup_repo();
        let result = repo.remote_url("nonexistent");
        assert!(matches!(result, Err(GitError::RemoteNotFound(_))));
    }

    #[test]
    fn test_remote_url() {
        let (_temp, repo) = setup_repo();
        repo.inner()
            .remote("origin", "https://github.com/acme/widgets.git")
            .unwrap();
        let url = repo.remote_url("origin").unwrap();
        assert_eq!(url.as_deref(), Some("https://github.com/acme/widgets.git"));
    }

    #[test]
    fn test_push_to_missing_remote_fails() {
        let (temp, _repo) = setup_repo();
        let result = git_force_push(temp.path(), "nonexistent", "main");
        assert!(matches!(result, Err(GitError::PushFailed(_))));
    }
}
