//! Data model for project directory listings.

use serde::{Deserialize, Serialize};

/// Dependency-cache directory rendered as a stub instead of being recursed
/// into, to bound listing size.
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Placeholder child shown under the stubbed dependency-cache directory.
pub const NODE_MODULES_PLACEHOLDER: &str = "(node modules not shown)";

/// Kind of a node in a project directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
    /// Informational placeholder, not a real filesystem entry.
    Info,
}

/// One entry in a project directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// A file leaf.
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: NodeKind::File, children: None }
    }

    /// A directory with the given children.
    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self { name: name.into(), kind: NodeKind::Directory, children: Some(children) }
    }

    /// An informational placeholder.
    pub fn info(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: NodeKind::Info, children: None }
    }
}

/// Structured failure returned instead of partial listing output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_node_serializes_without_children() {
        let value = serde_json::to_value(TreeNode::file("a.txt")).unwrap();
        assert_eq!(value, serde_json::json!({"name": "a.txt", "type": "file"}));
    }

    #[test]
    fn directory_node_serializes_with_children() {
        let node = TreeNode::directory("src", vec![TreeNode::file("main.js")]);
        let value = serde_json::to_value(node).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "src",
                "type": "directory",
                "children": [{"name": "main.js", "type": "file"}]
            })
        );
    }

    #[test]
    fn info_node_uses_lowercase_kind() {
        let value = serde_json::to_value(TreeNode::info(NODE_MODULES_PLACEHOLDER)).unwrap();
        assert_eq!(value["type"], "info");
    }
}
