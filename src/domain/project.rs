//! Persisted pointer to the active project root.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// File name of the persisted configuration document.
pub const CONFIG_FILE: &str = "config.json";

/// Persisted configuration document.
///
/// A JSON object whose `active_project_path` field names the directory all
/// file operations are confined to. An absent field means no project is
/// bound yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Absolute path of the active project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_project_path: Option<PathBuf>,
}

/// Resolve the HOME-based configuration directory.
///
/// Uses $HOME/.config/atelier for consistency across platforms and tests.
pub fn default_config_dir() -> Result<PathBuf, AppError> {
    let home = std::env::var("HOME")
        .map_err(|_| AppError::configuration("HOME environment variable not set"))?;
    Ok(PathBuf::from(home).join(".config").join("atelier"))
}
