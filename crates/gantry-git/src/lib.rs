//! Gantry Git - git plumbing for release automation
//!
//! Wraps the git2 operations the release workflows need: release branch
//! preparation, commit-all, package tags, and CLI-backed pushes.

pub mod branch;
pub mod remote;
pub mod repository;
pub mod tags;
pub mod types;

pub use remote::{git_force_push, git_push_tag};
pub use repository::{GitRepo, Result};
pub use types::TagInfo;
