//! Package discovery in npm-workspace monorepos

use std::path::{Path, PathBuf};

use glob::glob;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::PackageError;

/// Result type for package operations
pub type Result<T> = std::result::Result<T, PackageError>;

/// A discovered workspace package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Package version
    pub version: String,
    /// Path to the package directory
    pub path: PathBuf,
    /// Path to the manifest file
    pub manifest_path: PathBuf,
    /// Whether this is a private package
    pub private: bool,
}

impl Package {
    /// Tag name for this package at its current version
    pub fn tag_name(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Title used in the aggregated changelog
    pub fn title(&self) -> String {
        self.tag_name()
    }
}

/// Root `package.json` fields Gantry cares about
#[derive(Debug, Clone, Deserialize)]
pub struct RootManifest {
    /// Root package name
    pub name: Option<String>,
    /// Root package version (the release version after bumping)
    pub version: Option<String>,
    /// Workspace glob patterns
    #[serde(default)]
    pub workspaces: Workspaces,
}

impl RootManifest {
    /// Release version, required for the aggregated changelog heading
    pub fn release_version(&self) -> Result<&str> {
        self.version
            .as_deref()
            .ok_or(PackageError::MissingRootVersion)
    }
}

/// The `workspaces` field comes in two shapes: a plain array of globs or
/// an object with a `packages` array (yarn's extended form).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    /// No workspaces declared
    #[default]
    None,
    /// `"workspaces": ["packages/*"]`
    Patterns(Vec<String>),
    /// `"workspaces": { "packages": ["packages/*"] }`
    Extended {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Workspaces {
    /// Glob patterns, whichever shape was used
    pub fn patterns(&self) -> &[String] {
        match self {
            Self::None => &[],
            Self::Patterns(p) => p,
            Self::Extended { packages } => packages,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: String,
    version: Option<String>,
    #[serde(default)]
    private: bool,
}

/// Read and parse the root `package.json`
pub fn read_root_manifest(root: &Path) -> Result<RootManifest> {
    let path = root.join("package.json");
    if !path.exists() {
        return Err(PackageError::RootManifestNotFound(path));
    }

    let content = std::fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| PackageError::ManifestParseError {
        path,
        message: e.to_string(),
    })
}

/// Discover all workspace packages under `root`.
///
/// Patterns come from the root manifest's `workspaces` field; every matched
/// directory containing a `package.json` with a version becomes a package.
/// Results are sorted by name.
#[instrument(fields(root = %root.display()))]
pub fn discover_packages(root: &Path) -> Result<Vec<Package>> {
    let manifest = read_root_manifest(root)?;
    let patterns = manifest.workspaces.patterns();
    debug!(pattern_count = patterns.len(), "discovering packages");

    let mut packages = Vec::new();
    for pattern in patterns {
        let full_pattern = root.join(pattern).to_string_lossy().to_string();

        for entry in glob(&full_pattern).map_err(|e| PackageError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })? {
            let path = entry.map_err(|e| PackageError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;

            if !path.is_dir() {
                continue;
            }

            let manifest_path = path.join("package.json");
            if !manifest_path.exists() {
                continue;
            }

            let content = std::fs::read_to_string(&manifest_path)?;
            let parsed: PackageManifest =
                serde_json::from_str(&content).map_err(|e| PackageError::ManifestParseError {
                    path: manifest_path.clone(),
                    message: e.to_string(),
                })?;

            let Some(version) = parsed.version else {
                debug!(path = %manifest_path.display(), "skipping versionless package");
                continue;
            };

            packages.push(Package {
                name: parsed.name,
                version,
                path,
                manifest_path,
                private: parsed.private,
            });
        }
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    info!(count = packages.len(), "discovered workspace packages");
    Ok(packages)
}
