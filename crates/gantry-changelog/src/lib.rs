//! Gantry Changelog - aggregated release changelog generation
//!
//! This crate turns per-package changeset changelogs into a single
//! aggregated release document: entries are extracted per version,
//! classified into major/patch buckets, and re-assembled under
//! "Features" and "Bug fixes" sections.

pub mod classify;
pub mod entry;
pub mod formatter;
pub mod render;

pub use classify::{ChangeClassifier, ClassifiedChange};
pub use entry::{extract_entry, ChangelogEntry};
pub use formatter::format_document;
pub use render::AggregatedDocument;
