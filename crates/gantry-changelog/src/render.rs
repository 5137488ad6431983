//! Bucket rendering and aggregated document assembly

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::classify::ClassifiedChange;

/// The aggregated release changelog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedDocument {
    /// Release version used in the top-level heading
    pub release_version: String,
    /// Joined feature subsections
    pub features_markdown: String,
    /// Joined bug-fix subsections
    pub bugfixes_markdown: String,
}

/// Render one bucket subsection: a level-3 heading with the package title
/// followed by the section text after the literal "Changes" marker.
///
/// A section without the marker contributes nothing rather than failing;
/// the classifier only ever produces sections that start at a marker, but
/// hand-edited changelogs are not guaranteed to keep them well-formed.
fn render_subsection(title: &str, section: &str) -> Option<String> {
    let (_, rest) = section.split_once("Changes")?;
    Some(format!("### {}\n{}", title, rest.trim()))
}

fn join_bucket<'a>(
    changes: impl Iterator<Item = (&'a str, &'a str)>,
) -> String {
    let subsections: Vec<String> = changes
        .filter(|(_, section)| !section.is_empty())
        .filter_map(|(title, section)| render_subsection(title, section))
        .collect();
    subsections.join("\n")
}

impl AggregatedDocument {
    /// Assemble the document from classified changes.
    ///
    /// Major sections feed the "Features" bucket, patch sections the
    /// "Bug fixes" bucket. Input order is preserved as given (the
    /// classifier already yields title order), so assembly is idempotent.
    #[instrument(skip(changes), fields(release_version, change_count = changes.len()))]
    pub fn assemble(release_version: impl Into<String>, changes: &[ClassifiedChange]) -> Self {
        let features_markdown = join_bucket(
            changes
                .iter()
                .map(|c| (c.package_title.as_str(), c.major_section.as_str())),
        );
        let bugfixes_markdown = join_bucket(
            changes
                .iter()
                .map(|c| (c.package_title.as_str(), c.patch_section.as_str())),
        );

        let doc = Self {
            release_version: release_version.into(),
            features_markdown,
            bugfixes_markdown,
        };
        debug!(
            features_len = doc.features_markdown.len(),
            bugfixes_len = doc.bugfixes_markdown.len(),
            "assembled aggregated document"
        );
        doc
    }

    /// Render the final markdown: a release heading, the "Features"
    /// section, a blank line, and the "Bug fixes" section, with every
    /// line left-trimmed.
    pub fn render(&self) -> String {
        let body = format!(
            "## Features\n{}\n\n## Bug fixes\n{}",
            self.features_markdown, self.bugfixes_markdown
        );

        let trimmed: Vec<&str> = body.lines().map(str::trim_start).collect();

        format!(
            "# Release v{}\n\n{}\n",
            self.release_version,
            trimmed.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ChangeClassifier;

    fn change(title: &str, major: &str, patch: &str) -> ClassifiedChange {
        ClassifiedChange {
            package_title: title.to_string(),
            major_section: major.to_string(),
            patch_section: patch.to_string(),
        }
    }

    #[test]
    fn test_render_subsection_strips_marker() {
        let section = "Major Changes\n\n- Dropped node 14\n";
        let rendered = render_subsection("pkg-a@2.0.0", section).unwrap();
        assert_eq!(rendered, "### pkg-a@2.0.0\n- Dropped node 14");
    }

    #[test]
    fn test_render_subsection_without_marker() {
        // Malformed section: no "Changes" word at all
        assert!(render_subsection("pkg-a@2.0.0", "just some text").is_none());
    }

    #[test]
    fn test_assemble_buckets() {
        let changes = vec![
            change("pkg-a@2.0.0", "Major Changes\n\n- Breaking\n", ""),
            change("pkg-b@1.0.1", "", "Patch Changes\n\n- Fixed\n"),
        ];

        let doc = AggregatedDocument::assemble("1.2.0", &changes);
        assert!(doc.features_markdown.contains("pkg-a@2.0.0"));
        assert!(doc.features_markdown.contains("- Breaking"));
        assert!(!doc.features_markdown.contains("pkg-b"));
        assert!(doc.bugfixes_markdown.contains("pkg-b@1.0.1"));
        assert!(!doc.bugfixes_markdown.contains("pkg-a"));
    }

    #[test]
    fn test_render_section_ordering() {
        let changes = vec![change(
            "pkg-a@2.0.0",
            "Major Changes\n\n- Breaking\n",
            "Patch Changes\n\n- Fixed\n",
        )];
        let doc = AggregatedDocument::assemble("1.2.0", &changes);
        let output = doc.render();

        let release = output.find("# Release v1.2.0").unwrap();
        let features = output.find("## Features").unwrap();
        let bugfixes = output.find("## Bug fixes").unwrap();
        assert!(release < features);
        assert!(features < bugfixes);
    }

    #[test]
    fn test_render_left_trims_lines() {
        let changes = vec![change(
            "pkg-a@2.0.0",
            "Major Changes\n\n- first\n   - indented bullet\n",
            "",
        )];
        let doc = AggregatedDocument::assemble("1.2.0", &changes);
        let output = doc.render();
        assert!(output.contains("\n- indented bullet"));
        assert!(!output.contains("   - indented bullet"));
    }

    #[test]
    fn test_render_idempotent() {
        let changes = vec![
            change("pkg-a@2.0.0", "Major Changes\n\n- One\n", ""),
            change("pkg-b@1.0.1", "", "Patch Changes\n\n- Two\n"),
        ];
        let first = AggregatedDocument::assemble("1.2.0", &changes).render();
        let second = AggregatedDocument::assemble("1.2.0", &changes).render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_to_end_two_packages() {
        // pkg-a has only a major section, pkg-b only a patch section
        let mut classifier = ChangeClassifier::new();
        classifier.add("## pkg-a@2.0.0\n\n### Major Changes\n\n- New engine\n");
        classifier.add("## pkg-b@1.0.1\n\n### Patch Changes\n\n- Sealed a leak\n");

        let doc = AggregatedDocument::assemble("5.0.0", &classifier.into_changes());
        let output = doc.render();

        assert!(output.starts_with("# Release v5.0.0\n"));

        let features_start = output.find("## Features").unwrap();
        let bugfixes_start = output.find("## Bug fixes").unwrap();
        let features = &output[features_start..bugfixes_start];
        let bugfixes = &output[bugfixes_start..];

        // Exactly one subsection per bucket, no cross-contamination
        assert_eq!(features.matches("### ").count(), 1);
        assert!(features.contains("### pkg-a@2.0.0"));
        assert!(features.contains("- New engine"));
        assert!(!features.contains("pkg-b"));

        assert_eq!(bugfixes.matches("### ").count(), 1);
        assert!(bugfixes.contains("### pkg-b@1.0.1"));
        assert!(bugfixes.contains("- Sealed a leak"));
        assert!(!bugfixes.contains("pkg-a"));
    }

    #[test]
    fn test_no_marker_package_absent_from_both_buckets() {
        let mut classifier = ChangeClassifier::new();
        classifier.add("## pkg-c@1.0.0\n\nUncategorized notes only.\n");

        let doc = AggregatedDocument::assemble("1.0.0", &classifier.into_changes());
        let output = doc.render();
        assert!(!output.contains("pkg-c"));
    }
}
