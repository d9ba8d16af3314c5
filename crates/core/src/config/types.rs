use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::order::OrderPolicy;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Profile {
    /// Directory holding named vaults (`--vault Work` -> `<vaults_dir>/Work`).
    pub vaults_dir: Option<String>,
    /// Folders to leave out of the merge (relative to the vault root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    /// File whose contents are appended to the default instructions.
    pub instructions_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    #[serde(default)]
    pub order: OrderPolicy,
    #[serde(default = "default_table_of_contents")]
    pub table_of_contents: bool,
    #[serde(default)]
    pub include_metadata: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            order: OrderPolicy::default(),
            table_of_contents: default_table_of_contents(),
            include_metadata: false,
        }
    }
}

fn default_table_of_contents() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    /// Config file the values came from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub vaults_dir: PathBuf,
    pub excluded_folders: Vec<PathBuf>,
    pub instructions_file: Option<PathBuf>,
    pub merge: MergeConfig,
    pub logging: LoggingConfig,
}
