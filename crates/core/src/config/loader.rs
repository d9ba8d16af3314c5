use crate::config::types::{ConfigFile, LoggingConfig, MergeConfig, Profile, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::{document_dir, home_dir};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("cannot expand '{0}': {1}")]
    Expand(String, String),
}

const DEFAULT_PROFILE: &str = "default";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// An explicit `config_path` must exist. Without one, the default location
    /// is used if present and built-in defaults otherwise.
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()));
                }
                p.to_path_buf()
            }
            None => {
                let p = default_config_path();
                if !p.exists() {
                    debug!(path = %p.display(), "no config file, using defaults");
                    return Self::defaults(profile_override);
                }
                p
            }
        };

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let prof = match cf.profiles.get(&active) {
            Some(p) => p.clone(),
            // A config without profiles runs the default profile on defaults
            None if active == DEFAULT_PROFILE && cf.profiles.is_empty() => Profile::default(),
            None => return Err(ConfigError::ProfileNotFound(active)),
        };

        Self::resolve_profile(&active, &prof, &cf.merge, &cf.logging, Some(path))
    }

    fn defaults(profile_override: Option<&str>) -> Result<ResolvedConfig, ConfigError> {
        match profile_override {
            Some(name) if name != DEFAULT_PROFILE => {
                Err(ConfigError::ProfileNotFound(name.to_string()))
            }
            _ => Self::resolve_profile(
                DEFAULT_PROFILE,
                &Profile::default(),
                &MergeConfig::default(),
                &LoggingConfig::default(),
                None,
            ),
        }
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        merge: &MergeConfig,
        log_cfg: &LoggingConfig,
        source: Option<PathBuf>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let vaults_dir = match &prof.vaults_dir {
            Some(dir) => expand_path(dir)?,
            None => default_vaults_dir(),
        };

        let excluded_folders = prof
            .excluded_folders
            .iter()
            .map(|f| expand_path(f))
            .collect::<Result<Vec<_>, _>>()?;

        let instructions_file =
            prof.instructions_file.as_deref().map(expand_path).transpose()?;

        let logging = match &log_cfg.file {
            Some(file) => LoggingConfig {
                file: Some(expand_path(&file.to_string_lossy())?),
                ..log_cfg.clone()
            },
            None => log_cfg.clone(),
        };

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            source,
            vaults_dir,
            excluded_folders,
            instructions_file,
            merge: merge.clone(),
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("vaultmerge").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("vaultmerge").join("config.toml")
}

/// Where named vaults live when no `vaults_dir` is configured.
///
/// On macOS this is the iCloud Obsidian container; elsewhere the documents folder.
pub fn default_vaults_dir() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if cfg!(target_os = "macos") {
        return home
            .join("Library")
            .join("Mobile Documents")
            .join("iCloud~md~obsidian")
            .join("Documents");
    }
    document_dir().unwrap_or(home)
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded =
        full(input).map_err(|e| ConfigError::Expand(input.to_string(), e.to_string()))?;
    Ok(PathBuf::from(expanded.to_string()))
}
