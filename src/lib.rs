//! atelier: sandboxed file-edit toolkit for LLM coding agents.
//!
//! The crate confines all file manipulation to a single active project
//! directory and exposes it as a small set of named tools an agent loop can
//! invoke: write, read, delete, list, and a model-assisted snippet edit.
//! Containment is enforced by a canonicalizing path guard; partial edits are
//! merged by a constrained-generation call that reproduces unrelated regions
//! of the file verbatim.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use adapters::HttpGenerator;
use services::{ActiveProjectRegistry, ToolSurface, render_listing};

pub use domain::AppError;

/// Bind the active project root, persisting it to configuration.
///
/// The directory must already exist; its canonical path is stored.
pub fn use_project(path: &Path) -> Result<PathBuf, AppError> {
    let root = path.canonicalize()?;
    if !root.is_dir() {
        return Err(AppError::Configuration(format!(
            "Not a directory: {}",
            root.display()
        )));
    }
    let registry = ActiveProjectRegistry::new_default()?;
    registry.bind(&root)?;
    Ok(root)
}

/// Build a tool surface over the persisted active project, using the HTTP
/// generation backend for edits.
pub fn tool_surface() -> Result<ToolSurface<HttpGenerator>, AppError> {
    let registry = ActiveProjectRegistry::new_default()?;
    let root = registry.active_root()?;
    Ok(ToolSurface::new(root, HttpGenerator::from_env()?))
}

/// Create or overwrite a file in the active project.
pub fn write_file(
    subdirectory: &str,
    file_name: &str,
    contents: &str,
) -> Result<String, AppError> {
    Ok(tool_surface()?.write_file(subdirectory, file_name, contents))
}

/// Read a file from the active project.
pub fn read_file(subdirectory: &str, file_name: &str) -> Result<String, AppError> {
    Ok(tool_surface()?.read_file(subdirectory, file_name))
}

/// Delete a file from the active project.
pub fn delete_file(subdirectory: &str, file_name: &str) -> Result<String, AppError> {
    Ok(tool_surface()?.delete_file(subdirectory, file_name))
}

/// List the active project tree, rendered as JSON.
pub fn list_project_directory() -> Result<String, AppError> {
    Ok(render_listing(tool_surface()?.list_project_directory()))
}

/// Apply a snippet edit to a file in the active project.
pub fn edit_file(
    subdirectory: &str,
    file_name: &str,
    code_snippet: &str,
    instructions: Option<&str>,
) -> Result<String, AppError> {
    Ok(tool_surface()?.edit_file(subdirectory, file_name, code_snippet, instructions))
}
