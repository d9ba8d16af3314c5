//! Resolve a vault identifier (name or path) to its root directory.

use std::path::{Path, PathBuf};

use shellexpand::tilde;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("can't find a vault named '{name}' (looked in {tried})")]
    NotFound { name: String, tried: String },
}

/// Locate a vault by path or by name.
///
/// An identifier that names an existing directory is used as-is. Otherwise it
/// is looked up as a child of `vaults_dir`.
pub fn locate_vault(
    identifier: &str,
    vaults_dir: Option<&Path>,
) -> Result<PathBuf, LocateError> {
    let direct = PathBuf::from(tilde(identifier).as_ref());
    if direct.is_dir() {
        return Ok(direct);
    }

    let mut tried = vec![direct.display().to_string()];

    if let Some(base) = vaults_dir {
        let named = base.join(identifier);
        if named.is_dir() {
            return Ok(named);
        }
        tried.push(named.display().to_string());
    }

    Err(LocateError::NotFound { name: identifier.to_string(), tried: tried.join(", ") })
}

/// Name used for the default output file: the vault directory's own name.
pub fn vault_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| root.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vault".to_string())
}
