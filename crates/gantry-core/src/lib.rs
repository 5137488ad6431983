//! Gantry Core - Core library for changeset release automation
//!
//! This crate provides the foundational types, error handling, configuration,
//! changeset discovery, and package discovery for the Gantry CI release tool.

pub mod changesets;
pub mod command;
pub mod config;
pub mod error;
pub mod packages;

pub use changesets::{parse_changeset, pending_changesets, planned_bumps, BumpType, Changeset};
pub use command::{command_available, run_command, run_command_with_stdin, CommandOutput};
pub use error::{GantryError, Result};
pub use packages::{discover_packages, read_root_manifest, Package, RootManifest, Workspaces};
