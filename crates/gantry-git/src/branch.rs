//! Release branch operations

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use gantry_core::error::GitError;

impl GitRepo {
    /// Get the current branch name (None on detached HEAD or unborn branch)
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    /// Create or reset `name` at HEAD and switch to it.
    ///
    /// Equivalent to `git checkout -B <name>`: an existing local branch is
    /// moved to the current HEAD commit, worktree files are kept as-is.
    #[instrument(skip(self), fields(name))]
    pub fn switch_to_fresh_branch(&self, name: &str) -> Result<()> {
        if self.current_branch()?.as_deref() == Some(name) {
            info!(name, "already on release branch");
            return Ok(());
        }

        let head = self.head_commit()?;
        self.repo.branch(name, &head, true)?;
        self.repo.set_head(&format!("refs/heads/{}", name))?;
        info!(name, "switched to release branch");
        Ok(())
    }

    /// Stage every change in the worktree and commit it.
    ///
    /// Returns the new commit id. Fails with [`GitError::NothingToCommit`]
    /// when the staged tree is identical to HEAD's.
    #[instrument(skip(self, name, email), fields(message))]
    pub fn commit_all(&self, message: &str, name: &str, email: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;
        if parent.tree_id() == tree_id {
            let branch = self.current_branch()?.unwrap_or_else(|| "HEAD".to_string());
            return Err(GitError::NothingToCommit(branch));
        }

        let sig = self.signature_or(name, email)?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?;

        info!(commit = %oid, "committed version changes");
        Ok(oid.to_string())
    }
}
