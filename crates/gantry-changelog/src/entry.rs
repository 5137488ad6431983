//! Per-package changelog entry extraction

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One package's changelog block for one version, titled with the package
/// heading so downstream classification can recover the package title from
/// the first line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Package title (`name@version`)
    pub package_title: String,
    /// Rendered text: a heading line followed by the version's body
    pub raw_content: String,
}

impl ChangelogEntry {
    /// Build a titled entry from a package title and the extracted body
    pub fn new(package_title: impl Into<String>, body: &str) -> Self {
        let package_title = package_title.into();
        let raw_content = format!("## {}\n\n{}", package_title, body.trim());
        Self {
            package_title,
            raw_content,
        }
    }
}

/// Extract the block for `version` from a package changelog.
///
/// Changeset changelogs head each version with a level-2 heading holding
/// just the version string (`## 1.2.0`, sometimes bracketed). The block
/// runs from after that heading to the next level-2 heading or the end of
/// the file. Returns `None` when no heading for the version exists.
pub fn extract_entry(changelog: &str, version: &str) -> Option<String> {
    let heading =
        Regex::new(&format!(r"^##\s+\[?{}\]?\s*$", regex::escape(version))).expect("valid pattern");

    let mut collecting = false;
    let mut body: Vec<&str> = Vec::new();

    for line in changelog.lines() {
        if collecting {
            if line.starts_with("## ") {
                break;
            }
            body.push(line);
        } else if heading.is_match(line.trim_end()) {
            collecting = true;
        }
    }

    if !collecting {
        debug!(version, "no changelog entry for version");
        return None;
    }

    Some(body.join("\n").trim().to_string())
}
