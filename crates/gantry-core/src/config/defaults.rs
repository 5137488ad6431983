//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "gantry.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "gantry.toml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ".gantry.yaml",
        ".gantry.toml",
    ]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    let config = Config::default();
    serde_yaml::to_string(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Gantry Configuration

git:
  remote: origin
  base_branch: main
  release_branch_prefix: gantry-release
  commit_message: "Version packages"

github:
  api_url: "https://api.github.com"
  token_env: GITHUB_TOKEN

version:
  command: "npx changeset version"
  pr_title: "Version Packages"

publish:
  command: "npx changeset publish"
  github_releases: true

changelog:
  directory: changelogs
  changeset_directory: .changeset
  file_name: CHANGELOG.md
  # formatter: "npx prettier --parser markdown"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.git.base_branch, "main");
        assert!(config.changelog.formatter.is_none());
    }
}
