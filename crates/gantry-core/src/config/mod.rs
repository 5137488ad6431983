//! Configuration handling

mod defaults;
mod loader;
mod types;
mod validation;

pub use defaults::{config_file_names, default_config_yaml, DEFAULT_CONFIG_TEMPLATE};
pub use loader::{find_config, load_config, load_config_from_dir, load_config_or_default};
pub use types::{ChangelogConfig, Config, GitConfig, GitHubConfig, PublishConfig, VersionConfig};
pub use validation::validate_config;
