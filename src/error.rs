//! Error types for butterfly-guidance
//!
//! Precondition violations (degenerate coordinates, angles outside [0, 360])
//! are caller defects and are checked with `debug_assert!`. Everything a
//! caller can trigger with data it does not control lands here.

use thiserror::Error;

use crate::geometry::{EdgeId, NodeId};

#[derive(Error, Debug)]
pub enum GuidanceError {
    #[error("Node {0} has no coordinate")]
    UnknownNode(NodeId),
    #[error("Compressed geometry for edge {0} is empty")]
    EmptyGeometry(EdgeId),
    #[error("Invalid direction modifier: {0}")]
    InvalidDirectionModifier(u8),
    #[error("Invalid turn type: {0}")]
    InvalidTurnType(u8),
    #[error("Unknown road class: {0}")]
    UnknownRoadClass(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GuidanceError>;
