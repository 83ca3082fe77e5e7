mod error;
mod outcome;
mod project;
mod tree;

pub use error::AppError;
pub use outcome::{DeleteOutcome, ReadOutcome, WriteOutcome};
pub use project::{CONFIG_FILE, ProjectConfig, default_config_dir};
pub use tree::{ListError, NODE_MODULES_DIR, NODE_MODULES_PLACEHOLDER, NodeKind, TreeNode};
