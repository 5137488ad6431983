//! Publish command: run the publish command, then tag the published
//! packages and create their GitHub releases.

use clap::Args;
use console::style;
use tracing::{debug, info};

use gantry_core::config::{load_config_or_default, validate_config, Config};
use gantry_core::error::ChangelogError;
use gantry_core::{discover_packages, run_command, Package};
use gantry_git::{git_push_tag, GitRepo};
use gantry_github::{GitHubClient, GitHubClientConfig, Release, RepoSlug};

use crate::cli::{output, Cli, OutputFormat};

/// Publish packages, then tag and create releases for them
#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Show the packages that would be published without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl PublishCommand {
    /// Execute the publish command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(dry_run = self.dry_run, "executing publish command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        validate_config(&config)?;

        let repo = GitRepo::discover(&cwd)?;
        let root = repo.path().to_path_buf();

        let packages = discover_packages(&root)?;
        let candidates = untagged_candidates(&repo, packages)?;

        if self.dry_run {
            return print_candidates(cli, &candidates);
        }

        // The publish command runs unconditionally: a tag existing does not
        // mean the matching version reached the registry, and the command
        // itself skips versions that are already published.
        super::ensure_command_available("publish", &config.publish.command)?;
        run_command(&config.publish.command, &root)?;

        if candidates.is_empty() {
            if !cli.quiet {
                output::info("All package versions were already tagged, no new tags or releases");
            }
            return Ok(());
        }

        let client = if config.publish.github_releases {
            Some(build_client(&repo, &config)?)
        } else {
            None
        };

        let mut releases = Vec::new();
        for pkg in &candidates {
            let tag = pkg.tag_name();

            // The publish command may have tagged the package itself
            if !repo.tag_exists(&tag)? {
                repo.create_tag(&tag)?;
            }
            git_push_tag(&root, &config.git.remote, &tag)?;

            if let Some(client) = &client {
                let release = create_release(client, pkg, &config).await?;
                if !cli.quiet && cli.format == OutputFormat::Text {
                    output::success(&format!(
                        "Released {}: {}",
                        style(&tag).cyan(),
                        release.html_url
                    ));
                }
                releases.push(release);
            } else if !cli.quiet && cli.format == OutputFormat::Text {
                output::success(&format!("Tagged {}", style(&tag).cyan()));
            }
        }

        if cli.format == OutputFormat::Json {
            let json = serde_json::json!({
                "published": candidates.iter().map(Package::tag_name).collect::<Vec<_>>(),
                "releases": releases.iter().map(|r| &r.html_url).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }

        Ok(())
    }
}

/// Non-private packages whose `{name}@{version}` tag was absent before the
/// publish command ran. The snapshot must predate the run, since the
/// publish command may create tags of its own.
fn untagged_candidates(repo: &GitRepo, packages: Vec<Package>) -> anyhow::Result<Vec<Package>> {
    let mut candidates = Vec::new();
    for pkg in packages {
        if pkg.private {
            debug!(name = %pkg.name, "skipping private package");
            continue;
        }
        if !repo.tag_exists(&pkg.tag_name())? {
            candidates.push(pkg);
        }
    }
    Ok(candidates)
}

fn print_candidates(cli: &Cli, candidates: &[Package]) -> anyhow::Result<()> {
    if cli.format == OutputFormat::Json {
        let json = serde_json::json!({
            "to_publish": candidates.iter().map(Package::tag_name).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("Packages to publish:");
    for pkg in candidates {
        println!("{}", output::key_value(&pkg.name, &pkg.version));
    }
    Ok(())
}

fn build_client(repo: &GitRepo, config: &Config) -> anyhow::Result<GitHubClient> {
    let remote_url = repo
        .remote_url(&config.git.remote)?
        .ok_or_else(|| anyhow::anyhow!("remote '{}' has no URL", config.git.remote))?;
    let slug = RepoSlug::from_remote_url(&remote_url)?;

    Ok(GitHubClient::new(GitHubClientConfig::from_env(
        &config.github.api_url,
        &config.github.token_env,
        slug,
    )?)?)
}

async fn create_release(
    client: &GitHubClient,
    pkg: &Package,
    config: &Config,
) -> anyhow::Result<Release> {
    let changelog_path = pkg.path.join(&config.changelog.file_name);
    let content = std::fs::read_to_string(&changelog_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ChangelogError::FileNotFound(changelog_path.clone())
        } else {
            ChangelogError::Io(e)
        }
    })?;

    let body = gantry_changelog::extract_entry(&content, &pkg.version).ok_or_else(|| {
        ChangelogError::MissingEntry {
            package: pkg.name.clone(),
            version: pkg.version.clone(),
        }
    })?;

    let tag = pkg.tag_name();
    let release = client
        .create_release(&tag, &tag, &body, is_prerelease(&pkg.version))
        .await?;
    Ok(release)
}

/// Whether a version string carries a semver prerelease component.
///
/// Unparseable versions are treated as stable rather than failing the
/// publish run.
fn is_prerelease(version: &str) -> bool {
    semver::Version::parse(version)
        .map(|v| !v.pre.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn package(name: &str, version: &str, private: bool) -> Package {
        Package {
            name: name.to_string(),
            version: version.to_string(),
            path: PathBuf::from(format!("packages/{}", name)),
            manifest_path: PathBuf::from(format!("packages/{}/package.json", name)),
            private,
        }
    }

    fn setup_repo_with_tag(tag: &str) -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();
        std::fs::write(temp.path().join("file.txt"), "content").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let commit = repo.find_commit(oid).unwrap();
        repo.tag_lightweight(tag, commit.as_object(), false).unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_untagged_candidates_skips_tagged_and_private() {
        let (_temp, repo) = setup_repo_with_tag("pkg-a@1.0.0");
        let packages = vec![
            package("pkg-a", "1.0.0", false),
            package("pkg-b", "0.2.0", false),
            package("internal", "0.0.1", true),
        ];

        let candidates = untagged_candidates(&repo, packages).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "pkg-b");
    }

    #[test]
    fn test_untagged_candidates_empty_when_all_tagged() {
        let (_temp, repo) = setup_repo_with_tag("pkg-a@1.0.0");
        let packages = vec![package("pkg-a", "1.0.0", false)];
        assert!(untagged_candidates(&repo, packages).unwrap().is_empty());
    }

    #[test]
    fn test_is_prerelease() {
        assert!(is_prerelease("1.0.0-beta.1"));
        assert!(is_prerelease("2.0.0-rc.0"));
        assert!(!is_prerelease("1.0.0"));
        assert!(!is_prerelease("not-a-version"));
    }
}
