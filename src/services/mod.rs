mod file_store;
mod merge;
mod path_guard;
mod registry;
mod tools;

pub use file_store::FileStore;
pub use merge::SnippetMergeEngine;
pub use path_guard::PathGuard;
pub use registry::ActiveProjectRegistry;
pub use tools::{
    DELETE_FILE_TOOL, EDIT_FILE_TOOL, LIST_PROJECT_DIRECTORY_TOOL, READ_FILE_TOOL, ToolSurface,
    WRITE_FILE_TOOL, render_listing, tool_definitions,
};
