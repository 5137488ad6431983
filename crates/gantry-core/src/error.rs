//! Error types for Gantry

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GantryError
pub type Result<T> = std::result::Result<T, GantryError>;

/// Main error type for Gantry operations
#[derive(Debug, Error)]
pub enum GantryError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changeset-related errors
    #[error(transparent)]
    Changeset(#[from] ChangesetError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Package discovery errors
    #[error(transparent)]
    Package(#[from] PackageError),

    /// External command errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// Failed to push
    #[error("Failed to push to remote: {0}")]
    PushFailed(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Nothing to commit on the release branch
    #[error("No changes to commit on branch {0}")]
    NothingToCommit(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changeset-related errors
#[derive(Debug, Error)]
pub enum ChangesetError {
    /// Changeset directory missing
    #[error("Changeset directory not found at {0}")]
    DirectoryNotFound(PathBuf),

    /// Frontmatter block missing or unterminated
    #[error("Changeset {0} has no frontmatter block")]
    MissingFrontmatter(PathBuf),

    /// Frontmatter could not be parsed
    #[error("Changeset {path} has invalid frontmatter: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    /// Unknown bump type in frontmatter
    #[error("Unknown bump type '{0}' (expected major, minor, or patch)")]
    UnknownBumpType(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Changelog file not found
    #[error("Changelog file not found at {0}")]
    FileNotFound(PathBuf),

    /// No entry for the expected version
    #[error("No changelog entry for {package}@{version}")]
    MissingEntry { package: String, version: String },

    /// Failed to write the aggregated document
    #[error("Failed to write changelog: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Package discovery errors
#[derive(Debug, Error)]
pub enum PackageError {
    /// Root manifest not found
    #[error("Root package.json not found at {0}")]
    RootManifestNotFound(PathBuf),

    /// Failed to parse a manifest
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParseError { path: PathBuf, message: String },

    /// Root manifest carries no version (needed for the release heading)
    #[error("Root package.json has no version field")]
    MissingRootVersion,

    /// Invalid workspace glob pattern
    #[error("Invalid workspace pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// External command errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Command string was empty after splitting
    #[error("Empty command")]
    Empty,

    /// Failed to spawn the command
    #[error("Failed to run '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command exited non-zero
    #[error("Command '{command}' failed with status {status}: {stderr}")]
    NonZero {
        command: String,
        status: i32,
        stderr: String,
    },

    /// Command output was not valid UTF-8
    #[error("Command '{0}' produced non-UTF8 output")]
    InvalidOutput(String),
}

impl GantryError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
