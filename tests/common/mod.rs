//! Shared testing utilities for atelier integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use atelier::domain::AppError;
use atelier::ports::{Directive, Generator};
use atelier::services::ToolSurface;

/// Deterministic generator for integration exercises: appends the snippet
/// found in the directive to the predicted baseline.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct AppendGenerator;

impl Generator for AppendGenerator {
    fn complete(&self, directive: &Directive) -> Result<String, AppError> {
        let snippet = extract_tag(&directive.prompt, "code_snippet").unwrap_or_default();
        Ok(format!("{}{}\n", directive.predicted, snippet))
    }
}

/// Pull the text between `<tag>` and `</tag>` out of a directive prompt.
#[allow(dead_code)]
pub fn extract_tag(prompt: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = prompt.find(&open)? + open.len();
    let end = prompt[start..].find(&close)? + start;
    Some(prompt[start..end].to_string())
}

/// Testing harness providing an isolated project and configuration home.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    project: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with an empty project directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let project = root.path().join("project");
        fs::create_dir_all(&project).expect("Failed to create test project directory");
        Self { root, project }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Path to the sandboxed project directory.
    pub fn project(&self) -> &Path {
        &self.project
    }

    /// A tool surface over the test project with a deterministic generator.
    pub fn surface(&self) -> ToolSurface<AppendGenerator> {
        self.surface_with(AppendGenerator)
    }

    /// A tool surface over the test project with a custom generator.
    pub fn surface_with<G: Generator>(&self, generator: G) -> ToolSurface<G> {
        ToolSurface::new(self.project.clone(), generator)
    }

    /// Build a command for invoking the compiled `atelier` binary with the
    /// emulated home directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("atelier").expect("Failed to locate atelier binary");
        cmd.env("HOME", self.home());
        cmd
    }
}
