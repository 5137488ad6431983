//! Optional external formatter hook
//!
//! The aggregated document can be piped through an external markdown
//! formatter (e.g. prettier) before being written. Formatting is best
//! effort: any failure falls back to the unformatted text.

use std::path::Path;

use tracing::{debug, warn};

use gantry_core::command::run_command_with_stdin;

/// Pipe `document` through the configured formatter, if any.
///
/// Returns the formatted text, or the original document unchanged when no
/// formatter is configured or the formatter fails for any reason.
pub fn format_document(formatter: Option<&str>, cwd: &Path, document: &str) -> String {
    let Some(command) = formatter else {
        return document.to_string();
    };

    match run_command_with_stdin(command, cwd, document) {
        Ok(output) if !output.stdout.is_empty() => {
            debug!(command, "formatted aggregated document");
            output.stdout
        }
        Ok(_) => {
            warn!(command, "formatter produced empty output, keeping original");
            document.to_string()
        }
        Err(e) => {
            warn!(command, error = %e, "formatter failed, keeping original");
            document.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_formatter_passes_through() {
        let temp = TempDir::new().unwrap();
        let doc = "# Release v1.0.0\n";
        assert_eq!(format_document(None, temp.path(), doc), doc);
    }

    #[test]
    fn test_formatter_output_used() {
        let temp = TempDir::new().unwrap();
        let doc = "# Release v1.0.0\n";
        let formatted = format_document(Some("cat"), temp.path(), doc);
        assert_eq!(formatted, doc);
    }

    #[test]
    fn test_formatter_failure_swallowed() {
        let temp = TempDir::new().unwrap();
        let doc = "# Release v1.0.0\n";
        let formatted = format_document(Some("false"), temp.path(), doc);
        assert_eq!(formatted, doc);
    }

    #[test]
    fn test_missing_formatter_swallowed() {
        let temp = TempDir::new().unwrap();
        let doc = "# Release v1.0.0\n";
        let formatted = format_document(
            Some("definitely-not-a-real-binary-xyz"),
            temp.path(),
            doc,
        );
        assert_eq!(formatted, doc);
    }
}
