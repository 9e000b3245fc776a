//! Layout error types.

use thiserror::Error;

use crate::tree::NodeId;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// Invalid node configuration, raised at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A proportional node with neither a parent nor a page rectangle.
    #[error("proportional node {node} has no parent and no page content rect to anchor to")]
    MissingAnchor { node: NodeId },

    /// A flex child was resolved before its container distributed.
    #[error("node {node} resolved before flex container {container} ran its distribution pass")]
    LayoutNotComputed { node: NodeId, container: NodeId },

    /// A handle that does not belong to this tree.
    #[error("node {node} does not exist in this tree")]
    UnknownNode { node: NodeId },

    #[error("node {node} is already attached to a parent")]
    AlreadyAttached { node: NodeId },

    #[error("attaching node {node} would create a cycle")]
    CycleDetected { node: NodeId },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
