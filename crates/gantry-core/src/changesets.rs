//! Pending changeset discovery
//!
//! A changeset is a markdown file under the changeset directory with a YAML
//! frontmatter block mapping package names to bump types, followed by a
//! human-written summary:
//!
//! ```markdown
//! ---
//! "pkg-a": minor
//! "pkg-b": patch
//! ---
//!
//! Added a widget.
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ChangesetError;

/// Result type for changeset operations
pub type Result<T> = std::result::Result<T, ChangesetError>;

/// Semantic version bump requested by a changeset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Bug-fix level bump
    Patch,
    /// Feature level bump
    Minor,
    /// Breaking change bump
    Major,
}

impl BumpType {
    /// Parse from a frontmatter value
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            other => Err(ChangesetError::UnknownBumpType(other.to_string())),
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// A single pending changeset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changeset {
    /// Identifier (the file stem)
    pub id: String,
    /// Path of the changeset file
    pub path: PathBuf,
    /// Bump requested per package
    pub releases: BTreeMap<String, BumpType>,
    /// Human-written summary below the frontmatter
    pub summary: String,
}

/// Parse a changeset file's content
pub fn parse_changeset(path: &Path, content: &str) -> Result<Changeset> {
    let rest = content
        .strip_prefix("---")
        .ok_or_else(|| ChangesetError::MissingFrontmatter(path.to_path_buf()))?;

    let end = rest
        .find("\n---")
        .ok_or_else(|| ChangesetError::MissingFrontmatter(path.to_path_buf()))?;

    let frontmatter = &rest[..end];
    let summary = rest[end + 4..].trim().to_string();

    let raw: BTreeMap<String, String> =
        serde_yaml::from_str(frontmatter).map_err(|e| ChangesetError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut releases = BTreeMap::new();
    for (package, bump) in raw {
        releases.insert(package, BumpType::parse(&bump)?);
    }

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(Changeset {
        id,
        path: path.to_path_buf(),
        releases,
        summary,
    })
}

/// Discover pending changesets under `dir`.
///
/// Every `*.md` file except `README.md` counts. Files are returned sorted
/// by id so the output is stable.
#[instrument(fields(dir = %dir.display()))]
pub fn pending_changesets(dir: &Path) -> Result<Vec<Changeset>> {
    if !dir.is_dir() {
        return Err(ChangesetError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut changesets = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_markdown = path.extension().is_some_and(|e| e == "md");
        let is_readme = path
            .file_name()
            .is_some_and(|n| n.eq_ignore_ascii_case("README.md"));
        if !is_markdown || is_readme {
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        changesets.push(parse_changeset(&path, &content)?);
    }

    changesets.sort_by(|a, b| a.id.cmp(&b.id));
    info!(count = changesets.len(), "discovered pending changesets");
    Ok(changesets)
}

/// Highest bump requested per package across all pending changesets
pub fn planned_bumps(changesets: &[Changeset]) -> BTreeMap<String, BumpType> {
    let mut bumps: BTreeMap<String, BumpType> = BTreeMap::new();
    for changeset in changesets {
        for (package, bump) in &changeset.releases {
            bumps
                .entry(package.clone())
                .and_modify(|b| *b = (*b).max(*bump))
                .or_insert(*bump);
        }
    }
    debug!(package_count = bumps.len(), "computed planned bumps");
    bumps
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"---
"pkg-a": minor
"pkg-b": patch
---

Added a widget.
"#;

    #[test]
    fn test_parse_changeset() {
        let changeset = parse_changeset(Path::new("quick-foxes-jump.md"), SAMPLE).unwrap();
        assert_eq!(changeset.id, "quick-foxes-jump");
        assert_eq!(changeset.releases["pkg-a"], BumpType::Minor);
        assert_eq!(changeset.releases["pkg-b"], BumpType::Patch);
        assert_eq!(changeset.summary, "Added a widget.");
    }

    #[test]
    fn test_parse_missing_frontmatter() {
        let result = parse_changeset(Path::new("bad.md"), "no frontmatter here");
        assert!(matches!(result, Err(ChangesetError::MissingFrontmatter(_))));
    }

    #[test]
    fn test_parse_unknown_bump() {
        let content = "---\n\"pkg-a\": gigantic\n---\n\nBoom.\n";
        let result = parse_changeset(Path::new("bad.md"), content);
        assert!(matches!(result, Err(ChangesetError::UnknownBumpType(_))));
    }

    #[test]
    fn test_pending_skips_readme() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("README.md"), "docs").unwrap();
        std::fs::write(temp.path().join("two-foxes.md"), SAMPLE).unwrap();
        std::fs::write(temp.path().join("config.json"), "{}").unwrap();

        let changesets = pending_changesets(temp.path()).unwrap();
        assert_eq!(changesets.len(), 1);
        assert_eq!(changesets[0].id, "two-foxes");
    }

    #[test]
    fn test_pending_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = pending_changesets(&temp.path().join("nope"));
        assert!(matches!(result, Err(ChangesetError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_planned_bumps_takes_highest() {
        let a = parse_changeset(Path::new("a.md"), "---\n\"pkg-a\": patch\n---\n\nOne.\n").unwrap();
        let b = parse_changeset(Path::new("b.md"), "---\n\"pkg-a\": major\n---\n\nTwo.\n").unwrap();

        let bumps = planned_bumps(&[a, b]);
        assert_eq!(bumps["pkg-a"], BumpType::Major);
    }
}
