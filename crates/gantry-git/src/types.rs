//! Git types

use semver::Version;
use serde::{Deserialize, Serialize};

/// Information about a git tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Extracted version from the tag name
    pub version: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        let version = extract_version(&name);

        Self {
            name,
            commit_hash: commit_hash.into(),
            version,
        }
    }
}

/// Extract a semantic version from a tag name.
///
/// Handles the formats the workflows produce or encounter: `v1.0.0`,
/// `1.0.0`, and package tags like `@scope/pkg@1.0.0` or `pkg@1.0.0`.
fn extract_version(tag: &str) -> Option<String> {
    let candidate = match tag.rfind('@') {
        Some(idx) if idx > 0 => &tag[idx + 1..],
        _ => tag.strip_prefix('v').unwrap_or(tag),
    };

    Version::parse(candidate)
        .ok()
        .map(|_| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version_formats() {
        assert_eq!(TagInfo::new("v1.0.0", "abc").version.as_deref(), Some("1.0.0"));
        assert_eq!(TagInfo::new("1.2.3", "abc").version.as_deref(), Some("1.2.3"));
        assert_eq!(
            TagInfo::new("pkg-a@2.0.0", "abc").version.as_deref(),
            Some("2.0.0")
        );
        assert_eq!(
            TagInfo::new("@scope/pkg@1.0.0-beta.1", "abc").version.as_deref(),
            Some("1.0.0-beta.1")
        );
        assert_eq!(TagInfo::new("release-candidate", "abc").version, None);
    }
}
