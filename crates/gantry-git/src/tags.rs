//! Tag operations

use tracing::{info, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use gantry_core::error::GitError;

impl GitRepo {
    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let target = reference.peel_to_commit()?;
                Ok(Some(TagInfo::new(name, target.id().to_string())))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Check whether a tag exists
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.find_tag(name)?.is_some())
    }

    /// Create a lightweight tag at HEAD
    #[instrument(skip(self), fields(name))]
    pub fn create_tag(&self, name: &str) -> Result<TagInfo> {
        if self.tag_exists(name)? {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;

        info!(name, "created tag");
        Ok(TagInfo::new(name, head.id().to_string()))
    }
}
