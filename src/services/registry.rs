//! Active-project registry: a JSON-persisted pointer to the project root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, CONFIG_FILE, ProjectConfig, default_config_dir};

/// Holds the persisted active-project pointer.
///
/// The root is an explicit value loaded on demand; switching projects is a
/// controlled [`bind`](ActiveProjectRegistry::bind) call that rewrites the
/// configuration document atomically (full read/replace), never a silent
/// global mutation. Components consuming the root are constructed from a
/// loaded value and re-constructed after a rebind.
#[derive(Debug, Clone)]
pub struct ActiveProjectRegistry {
    config_path: PathBuf,
}

impl ActiveProjectRegistry {
    /// Registry backed by an explicit configuration file.
    pub fn with_config_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Registry backed by the HOME-based configuration directory.
    pub fn new_default() -> Result<Self, AppError> {
        Ok(Self { config_path: default_config_dir()?.join(CONFIG_FILE) })
    }

    /// Path of the backing configuration file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Strict loader: a missing configuration file is an error, as is an
    /// unset `active_project_path` field.
    pub fn active_root(&self) -> Result<PathBuf, AppError> {
        if !self.config_path.exists() {
            return Err(AppError::ProjectConfigMissing(self.config_path.display().to_string()));
        }
        self.load()?.active_project_path.ok_or(AppError::NoActiveProject)
    }

    /// Tolerant reader: absence of the file or the field is `None`, not an
    /// error. Malformed content still fails.
    pub fn try_active_root(&self) -> Result<Option<PathBuf>, AppError> {
        if !self.config_path.exists() {
            return Ok(None);
        }
        Ok(self.load()?.active_project_path)
    }

    /// Bind a new active project root, persisting it to configuration.
    pub fn bind(&self, root: &Path) -> Result<(), AppError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = ProjectConfig { active_project_path: Some(root.to_path_buf()) };
        let raw = serde_json::to_string_pretty(&config)
            .map_err(|e| AppError::configuration(format!("Failed to encode project config: {e}")))?;
        fs::write(&self.config_path, raw)?;
        Ok(())
    }

    fn load(&self) -> Result<ProjectConfig, AppError> {
        let raw = fs::read_to_string(&self.config_path)?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::configuration(format!("Malformed project config: {e}")))
    }
}
