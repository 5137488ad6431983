//! Entry classification into major/patch buckets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Literal subsection marker written by the changeset changelog generator
pub const MAJOR_MARKER: &str = "Major Changes";

/// Literal subsection marker for patch-level changes
pub const PATCH_MARKER: &str = "Patch Changes";

/// A changelog entry split into its major and patch section texts.
///
/// Either section may be empty; a package whose entry carries neither
/// marker simply contributes nothing to either bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedChange {
    /// Package title taken from the entry's heading line
    pub package_title: String,
    /// Section text from the major marker onward (possibly empty)
    pub major_section: String,
    /// Section text from the patch marker onward (possibly empty)
    pub patch_section: String,
}

impl ClassifiedChange {
    /// Classify a single entry's rendered text.
    ///
    /// The first line is expected to be a markdown heading holding the
    /// package title. The major section runs from the major marker to the
    /// patch marker when one follows it, otherwise to the end; the patch
    /// section runs from the patch marker to the end.
    pub fn classify(text: &str) -> Self {
        let first_line = text.lines().next().unwrap_or("");
        let package_title = first_line.trim_start_matches('#').trim().to_string();

        let major_idx = text.find(MAJOR_MARKER);
        let patch_idx = text.find(PATCH_MARKER);

        let major_section = match major_idx {
            Some(start) => {
                let end = match patch_idx {
                    Some(p) if p > start => p,
                    _ => text.len(),
                };
                text[start..end].to_string()
            }
            None => String::new(),
        };

        let patch_section = match patch_idx {
            Some(start) => text[start..].to_string(),
            None => String::new(),
        };

        Self {
            package_title,
            major_section,
            patch_section,
        }
    }
}

/// Collects classified entries keyed by package title.
///
/// A later entry with the same title overwrites an earlier one. Iteration
/// is in title order, which keeps rendering deterministic.
#[derive(Debug, Default)]
pub struct ChangeClassifier {
    changes: BTreeMap<String, ClassifiedChange>,
}

impl ChangeClassifier {
    /// Create an empty classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify an entry's rendered text and store the result
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn add(&mut self, text: &str) {
        let classified = ClassifiedChange::classify(text);
        debug!(
            title = %classified.package_title,
            has_major = !classified.major_section.is_empty(),
            has_patch = !classified.patch_section.is_empty(),
            "classified changelog entry"
        );
        self.changes
            .insert(classified.package_title.clone(), classified);
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether no entries have been stored
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// All classified changes, ordered by package title
    pub fn into_changes(self) -> Vec<ClassifiedChange> {
        self.changes.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: &str = "## pkg-a@2.0.0\n\n### Major Changes\n\n- Dropped node 14\n\n### Patch Changes\n\n- Fixed typo\n";

    #[test]
    fn test_classify_both_sections() {
        let change = ClassifiedChange::classify(BOTH);
        assert_eq!(change.package_title, "pkg-a@2.0.0");
        assert!(change.major_section.starts_with("Major Changes"));
        assert!(change.major_section.contains("Dropped node 14"));
        // The major section ends exactly where the patch marker begins
        assert!(!change.major_section.contains("Patch Changes"));
        assert!(change.patch_section.starts_with("Patch Changes"));
        assert!(change.patch_section.contains("Fixed typo"));
    }

    #[test]
    fn test_classify_patch_only() {
        let text = "## pkg-b@1.0.1\n\n### Patch Changes\n\n- Fixed a bug\n";
        let change = ClassifiedChange::classify(text);
        assert!(change.major_section.is_empty());
        assert!(change.patch_section.starts_with("Patch Changes"));
        assert!(change.patch_section.ends_with("- Fixed a bug\n"));
    }

    #[test]
    fn test_classify_major_only_runs_to_end() {
        let text = "## pkg-c@3.0.0\n\n### Major Changes\n\n- Rewrote everything\n";
        let change = ClassifiedChange::classify(text);
        assert!(change.major_section.contains("Rewrote everything"));
        assert!(change.patch_section.is_empty());
    }

    #[test]
    fn test_classify_no_markers() {
        let text = "## pkg-d@1.0.0\n\nNothing categorized here.\n";
        let change = ClassifiedChange::classify(text);
        assert!(change.major_section.is_empty());
        assert!(change.patch_section.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut classifier = ChangeClassifier::new();
        classifier.add("## pkg-a@2.0.0\n\n### Patch Changes\n\n- First\n");
        classifier.add("## pkg-a@2.0.0\n\n### Patch Changes\n\n- Second\n");

        let changes = classifier.into_changes();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].patch_section.contains("Second"));
        assert!(!changes[0].patch_section.contains("First"));
    }

    #[test]
    fn test_title_order_deterministic() {
        let mut classifier = ChangeClassifier::new();
        classifier.add("## zeta@1.0.0\n\n### Patch Changes\n\n- z\n");
        classifier.add("## alpha@1.0.0\n\n### Patch Changes\n\n- a\n");

        let changes = classifier.into_changes();
        assert_eq!(changes[0].package_title, "alpha@1.0.0");
        assert_eq!(changes[1].package_title, "zeta@1.0.0");
    }
}
