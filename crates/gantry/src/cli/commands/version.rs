//! Version command: apply pending changesets and open or update the
//! version PR.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use gantry_changelog::{format_document, AggregatedDocument, ChangeClassifier, ChangelogEntry};
use gantry_core::config::{load_config_or_default, validate_config, Config};
use gantry_core::error::{ChangelogError, GitError};
use gantry_core::{
    discover_packages, pending_changesets, planned_bumps, read_root_manifest, run_command, Package,
};
use gantry_git::{git_force_push, GitRepo};
use gantry_github::{GitHubClient, GitHubClientConfig, PullRequest, RepoSlug};

use crate::cli::{output, Cli, OutputFormat};

/// Apply pending changesets and open or update the version PR
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Show the planned bumps without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(dry_run = self.dry_run, "executing version command");
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd);
        if let Some(path) = &config_path {
            debug!(path = %path.display(), "loaded configuration");
        }
        validate_config(&config)?;

        let repo = GitRepo::discover(&cwd)?;
        let root = repo.path().to_path_buf();

        let changeset_dir = root.join(&config.changelog.changeset_directory);
        let changesets = pending_changesets(&changeset_dir)?;
        if changesets.is_empty() {
            if !cli.quiet {
                output::info("No pending changesets, nothing to version");
            }
            return Ok(());
        }

        let bumps = planned_bumps(&changesets);
        if self.dry_run {
            return print_plan(cli, &bumps);
        }

        super::ensure_command_available("version", &config.version.command)?;

        // Versions before the version command runs, so packages it bumped
        // can be told apart afterwards.
        let before = discover_packages(&root)?;

        let branch = config.git.release_branch();
        repo.switch_to_fresh_branch(&branch)?;

        run_command(&config.version.command, &root)?;

        let after = discover_packages(&root)?;
        let changed = changed_packages(&before, after);
        if changed.is_empty() {
            output::warning("Version command did not change any package versions");
            return Ok(());
        }
        info!(count = changed.len(), "packages bumped");

        let release_version = read_root_manifest(&root)?.release_version()?.to_string();

        let entries = collect_entries(&changed, &config).await?;

        let mut classifier = ChangeClassifier::new();
        for entry in &entries {
            classifier.add(&entry.raw_content);
        }
        let document =
            AggregatedDocument::assemble(&release_version, &classifier.into_changes()).render();
        let document = format_document(config.changelog.formatter.as_deref(), &root, &document);

        let aggregate_rel = config.changelog.aggregate_path(&release_version);
        write_aggregate(&root, &aggregate_rel, &document)?;

        match repo.commit_all(
            &config.git.commit_message,
            &config.git.fallback_name,
            &config.git.fallback_email,
        ) {
            Ok(_) => {}
            Err(GitError::NothingToCommit(branch)) => {
                // Re-run with identical output; the PR still gets refreshed
                warn!(branch, "no new changes to commit");
            }
            Err(e) => return Err(e.into()),
        }

        git_force_push(&root, &config.git.remote, &branch)?;

        let remote_url = repo
            .remote_url(&config.git.remote)?
            .ok_or_else(|| anyhow::anyhow!("remote '{}' has no URL", config.git.remote))?;
        let slug = RepoSlug::from_remote_url(&remote_url)?;

        let client = GitHubClient::new(GitHubClientConfig::from_env(
            &config.github.api_url,
            &config.github.token_env,
            slug.clone(),
        )?)?;

        let body = pr_body(&slug, &branch, &aggregate_rel, &entries);
        let pr = upsert_pr(&client, &config, &branch, &body).await?;

        if cli.format == OutputFormat::Json {
            let json = serde_json::json!({
                "release_version": release_version,
                "packages": changed.iter().map(Package::title).collect::<Vec<_>>(),
                "pull_request": { "number": pr.number, "url": pr.html_url },
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else if !cli.quiet {
            output::success(&format!(
                "Version PR #{} ready: {}",
                pr.number,
                style(&pr.html_url).cyan()
            ));
        }

        Ok(())
    }
}

fn print_plan(
    cli: &Cli,
    bumps: &std::collections::BTreeMap<String, gantry_core::BumpType>,
) -> anyhow::Result<()> {
    if cli.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "planned_bumps": bumps }))?
        );
        return Ok(());
    }

    println!("Planned bumps:");
    for (package, bump) in bumps {
        println!("{}", output::key_value(package, &bump.to_string()));
    }
    Ok(())
}

/// Packages whose version differs from the snapshot taken before the
/// version command ran (new packages count as changed).
fn changed_packages(before: &[Package], after: Vec<Package>) -> Vec<Package> {
    after
        .into_iter()
        .filter(|pkg| {
            before
                .iter()
                .find(|b| b.name == pkg.name)
                .map_or(true, |b| b.version != pkg.version)
        })
        .collect()
}

/// Read every bumped package's changelog concurrently and extract the
/// entry for its new version.
async fn collect_entries(
    changed: &[Package],
    config: &Config,
) -> anyhow::Result<Vec<ChangelogEntry>> {
    let mut set = JoinSet::new();
    for pkg in changed {
        let path = pkg.path.join(&config.changelog.file_name);
        let title = pkg.title();
        let version = pkg.version.clone();
        let name = pkg.name.clone();
        set.spawn(async move {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ChangelogError::FileNotFound(path.clone())
                } else {
                    ChangelogError::Io(e)
                }
            })?;
            let body = gantry_changelog::extract_entry(&content, &version)
                .ok_or(ChangelogError::MissingEntry {
                    package: name,
                    version,
                })?;
            Ok::<_, ChangelogError>(ChangelogEntry::new(title, &body))
        });
    }

    let mut entries = Vec::with_capacity(changed.len());
    while let Some(result) = set.join_next().await {
        entries.push(result??);
    }

    // Join order is completion order; sort so the PR body is stable
    entries.sort_by(|a, b| a.package_title.cmp(&b.package_title));
    Ok(entries)
}

fn write_aggregate(root: &Path, aggregate_rel: &Path, document: &str) -> anyhow::Result<()> {
    let path = root.join(aggregate_rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ChangelogError::WriteFailed(e.to_string()))?;
    }
    std::fs::write(&path, document).map_err(|e| ChangelogError::WriteFailed(e.to_string()))?;
    info!(path = %path.display(), "wrote aggregated changelog");
    Ok(())
}

fn pr_body(slug: &RepoSlug, branch: &str, aggregate_rel: &Path, entries: &[ChangelogEntry]) -> String {
    let changelog_url = slug.blob_url(branch, &aggregate_rel.to_string_lossy());

    let releases: Vec<&str> = entries.iter().map(|e| e.raw_content.as_str()).collect();

    format!(
        "This PR was opened automatically. When it is merged, the pending \
         changesets are applied and the packages below are released.\n\n\
         The aggregated changelog for this release is [here]({}).\n\n\
         # Releases\n\n{}\n",
        changelog_url,
        releases.join("\n\n")
    )
}

async fn upsert_pr(
    client: &GitHubClient,
    config: &Config,
    branch: &str,
    body: &str,
) -> anyhow::Result<PullRequest> {
    let title = &config.version.pr_title;
    let base = &config.git.base_branch;

    let pr = match client.find_version_pr(branch, base).await? {
        Some(existing) => client.update_pr(existing.number, title, body).await?,
        None => client.create_pr(title, body, branch, base).await?,
    };
    Ok(pr)
}
