//! TOML configuration with named profiles.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, default_vaults_dir};
pub use types::{LoggingConfig, MergeConfig, Profile, ResolvedConfig};
