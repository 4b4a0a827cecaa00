//! Error types.
//!
//! A render cycle that hits any of these is aborted as a whole: the
//! work-in-progress tree is dropped and the committed surface is left as it was.

use thiserror::Error;

use crate::engine::FiberId;
use crate::surface::NodeId;

/// Errors raised while building or committing a fiber tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An element descriptor does not have the `{type, props: {children}}` shape.
    #[error("malformed element at {path}: {reason}")]
    MalformedElement { path: String, reason: String },

    /// The display surface refused an operation.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// A fiber reached the commit phase without a display node.
    #[error("fiber {fiber} has no display node at commit time")]
    MissingNode { fiber: FiberId },
}

impl RenderError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedElement {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a [`Surface`](crate::surface::Surface) implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("invalid tag name {0:?}")]
    InvalidTag(String),

    #[error("node {0} cannot be appended to itself")]
    SelfAppend(NodeId),

    #[error("text node {0} cannot have children")]
    TextHasNoChildren(NodeId),

    #[error("node {child} is already attached to {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    /// Free-form rejection for surfaces with their own constraints.
    #[error("{0}")]
    Rejected(String),
}

/// Errors raised while loading a [`RendererConfig`](crate::config::RendererConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
