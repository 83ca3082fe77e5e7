//! Tool invocation surface exposed to the conversational agent.
//!
//! Each operation takes a project-relative `(subdirectory, file name)` pair,
//! composes the absolute path against the project root, delegates to the
//! file store or merge engine, and maps outcomes to stable user-facing
//! message strings. Nothing propagates past this boundary as an error: the
//! agent consumes tool results as plain text.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::domain::{
    DeleteOutcome, ListError, NODE_MODULES_DIR, NODE_MODULES_PLACEHOLDER, ReadOutcome, TreeNode,
    WriteOutcome,
};
use crate::ports::{FileChangeObserver, Generator};
use crate::services::{FileStore, PathGuard, SnippetMergeEngine};

/// Tool name for creating or overwriting a file.
pub const WRITE_FILE_TOOL: &str = "write_file_tool";
/// Tool name for reading a file.
pub const READ_FILE_TOOL: &str = "read_file_tool";
/// Tool name for deleting a file.
pub const DELETE_FILE_TOOL: &str = "delete_file_tool";
/// Tool name for listing the project tree.
pub const LIST_PROJECT_DIRECTORY_TOOL: &str = "list_project_directory_tool";
/// Tool name for applying a snippet edit.
pub const EDIT_FILE_TOOL: &str = "edit_file_tool";

/// Named file-manipulation operations exposed to the agent loop.
pub struct ToolSurface<G> {
    root: PathBuf,
    store: FileStore,
    merge: SnippetMergeEngine<G>,
}

impl<G: Generator> ToolSurface<G> {
    /// Build a surface rooted at `root`, wiring the path guard, file store,
    /// and merge engine.
    pub fn new(root: PathBuf, generator: G) -> Self {
        let store = FileStore::new(PathGuard::new(&root));
        Self { root, store, merge: SnippetMergeEngine::new(generator) }
    }

    /// Project root this surface operates on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register a file-change observer on the underlying store.
    pub fn subscribe(&mut self, observer: Arc<dyn FileChangeObserver>) {
        self.store.subscribe(observer);
    }

    fn full_path(&self, subdirectory: &str, file_name: &str) -> PathBuf {
        self.root.join(subdirectory).join(file_name)
    }

    /// Create or overwrite a file, creating intermediate directories first.
    pub fn write_file(&self, subdirectory: &str, file_name: &str, contents: &str) -> String {
        let path = self.full_path(subdirectory, file_name);

        // Containment is checked before directory creation so a rejected
        // path leaves no trace on the filesystem.
        if !self.store.guard().is_allowed(&path) {
            return format!("Write access to {file_name} is not allowed");
        }
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %err, "failed to create parent directories");
                return format!("Error writing to file {file_name}");
            }
        }

        match self.store.write(&path, contents) {
            WriteOutcome::Written => format!("Successfully wrote to file {file_name}"),
            WriteOutcome::NotAllowed => format!("Write access to {file_name} is not allowed"),
            WriteOutcome::IoError => format!("Error writing to file {file_name}"),
        }
    }

    /// Read a file, returning its raw contents or a descriptive message.
    pub fn read_file(&self, subdirectory: &str, file_name: &str) -> String {
        match self.store.read(&self.full_path(subdirectory, file_name)) {
            ReadOutcome::Content(contents) => contents,
            ReadOutcome::NotFound => format!("File {file_name} does not exist"),
            ReadOutcome::NotAllowed => format!("Read access to {file_name} is not allowed"),
            ReadOutcome::IoError => format!("Error reading file {file_name}"),
        }
    }

    /// Delete a file.
    pub fn delete_file(&self, subdirectory: &str, file_name: &str) -> String {
        match self.store.delete(&self.full_path(subdirectory, file_name)) {
            DeleteOutcome::Deleted => format!("Successfully deleted file {file_name}"),
            DeleteOutcome::NotFound => format!("File {file_name} does not exist"),
            DeleteOutcome::NotAllowed => format!("Delete access to {file_name} is not allowed"),
            DeleteOutcome::IoError => format!("Error deleting file {file_name}"),
        }
    }

    /// Enumerate the project tree.
    ///
    /// Hidden entries are skipped and `node_modules` is rendered as a stub
    /// directory. Any traversal failure yields a structured error instead of
    /// partial output.
    pub fn list_project_directory(&self) -> Result<Vec<TreeNode>, ListError> {
        build_tree(&self.root).map_err(|err| ListError {
            error: format!("Error listing project directory: {err}"),
        })
    }

    /// Apply a snippet edit to an existing file.
    ///
    /// On success the returned message echoes the full new contents so the
    /// agent can verify the edit without a separate read. On merge failure
    /// the original file is left untouched.
    pub fn edit_file(
        &self,
        subdirectory: &str,
        file_name: &str,
        code_snippet: &str,
        instructions: Option<&str>,
    ) -> String {
        let path = self.full_path(subdirectory, file_name);

        let original = match self.store.read(&path) {
            ReadOutcome::Content(contents) => contents,
            ReadOutcome::NotFound => return format!("File {file_name} does not exist"),
            ReadOutcome::NotAllowed => return format!("Edit access to {file_name} is not allowed"),
            ReadOutcome::IoError => return format!("Error reading file {file_name}"),
        };

        let merged = match self.merge.merge(&original, code_snippet, instructions) {
            Ok(contents) => contents,
            Err(err) => return format!("Error applying edit to file {file_name}: {err}"),
        };

        match self.store.write(&path, &merged) {
            WriteOutcome::Written => {
                format!("Successfully applied edit to file {file_name}. New file contents: {merged}")
            }
            WriteOutcome::NotAllowed => format!("Edit access to {file_name} is not allowed"),
            WriteOutcome::IoError => format!("Error editing file {file_name}"),
        }
    }

    /// Dispatch a named tool call with JSON arguments, as the agent loop
    /// does, returning the tool result as a single string.
    pub fn invoke(&self, tool: &str, args: &Value) -> String {
        match tool {
            WRITE_FILE_TOOL => match WriteArgs::deserialize(args) {
                Ok(a) => self.write_file(&a.file_path, &a.file_name, &a.contents),
                Err(err) => format!("Invalid arguments for {tool}: {err}"),
            },
            READ_FILE_TOOL => match FileArgs::deserialize(args) {
                Ok(a) => self.read_file(&a.file_path, &a.file_name),
                Err(err) => format!("Invalid arguments for {tool}: {err}"),
            },
            DELETE_FILE_TOOL => match FileArgs::deserialize(args) {
                Ok(a) => self.delete_file(&a.file_path, &a.file_name),
                Err(err) => format!("Invalid arguments for {tool}: {err}"),
            },
            LIST_PROJECT_DIRECTORY_TOOL => render_listing(self.list_project_directory()),
            EDIT_FILE_TOOL => match EditArgs::deserialize(args) {
                Ok(a) => self.edit_file(
                    &a.file_path,
                    &a.file_name,
                    &a.code_snippet,
                    a.instructions.as_deref(),
                ),
                Err(err) => format!("Invalid arguments for {tool}: {err}"),
            },
            _ => format!("Unknown tool: {tool}"),
        }
    }
}

#[derive(Deserialize)]
struct FileArgs {
    file_path: String,
    file_name: String,
}

#[derive(Deserialize)]
struct WriteArgs {
    file_path: String,
    file_name: String,
    contents: String,
}

#[derive(Deserialize)]
struct EditArgs {
    file_path: String,
    file_name: String,
    code_snippet: String,
    #[serde(default)]
    instructions: Option<String>,
}

/// Render a listing result as the JSON string handed back to the agent.
pub fn render_listing(listing: Result<Vec<TreeNode>, ListError>) -> String {
    let rendered = match listing {
        Ok(tree) => serde_json::to_string_pretty(&tree),
        Err(err) => serde_json::to_string(&err),
    };
    rendered.unwrap_or_else(|err| format!("Error listing project directory: {err}"))
}

fn build_tree(dir: &Path) -> io::Result<Vec<TreeNode>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut nodes = Vec::new();
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            if name == NODE_MODULES_DIR {
                nodes.push(TreeNode::directory(
                    name,
                    vec![TreeNode::info(NODE_MODULES_PLACEHOLDER)],
                ));
            } else {
                nodes.push(TreeNode::directory(name, build_tree(&path)?));
            }
        } else {
            nodes.push(TreeNode::file(name));
        }
    }
    Ok(nodes)
}

/// JSON-Schema definitions for the five tools, in the shape a
/// conversational-agent collaborator registers with its model provider.
pub fn tool_definitions() -> Vec<Value> {
    let file_path_param = json!({
        "type": "string",
        "description": "Path within the project where the file is located"
    });

    vec![
        json!({
            "type": "function",
            "function": {
                "name": WRITE_FILE_TOOL,
                "description": "Creates or overwrites a file. Automatically creates intermediate directories if they don't exist.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "file_path": file_path_param.clone(),
                        "file_name": {"type": "string", "description": "Name of the file to create or overwrite"},
                        "contents": {"type": "string", "description": "Contents to write to the file"}
                    },
                    "required": ["file_path", "file_name", "contents"]
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": READ_FILE_TOOL,
                "description": "Reads contents from a file in the project directory",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "file_path": file_path_param.clone(),
                        "file_name": {"type": "string", "description": "Name of the file to read"}
                    },
                    "required": ["file_path", "file_name"]
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": DELETE_FILE_TOOL,
                "description": "Deletes a file from the project directory",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "file_path": file_path_param.clone(),
                        "file_name": {"type": "string", "description": "Name of the file to delete"}
                    },
                    "required": ["file_path", "file_name"]
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": LIST_PROJECT_DIRECTORY_TOOL,
                "description": "Lists the project directory structure in a tree format",
                "parameters": {
                    "type": "object",
                    "properties": {},
                    "required": []
                }
            }
        }),
        json!({
            "type": "function",
            "function": {
                "name": EDIT_FILE_TOOL,
                "description": "Applies a code snippet to an existing file, using optional instructions to place it. Use this for minor edits.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "file_path": file_path_param.clone(),
                        "file_name": {"type": "string", "description": "Name of the file to edit"},
                        "code_snippet": {"type": "string", "description": "Code to integrate into the file"},
                        "instructions": {"type": "string", "description": "Plain-English directions for how to integrate the snippet"}
                    },
                    "required": ["file_path", "file_name", "code_snippet"]
                }
            }
        }),
    ]
}
