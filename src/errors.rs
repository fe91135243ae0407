//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`XrError`] covers recoverable API misuse:
//! - Stale or unknown node handles
//! - Hierarchy edits that would corrupt the scene graph
//! - Malformed geometry and prefab data
//! - Unknown input devices
//! - Invalid interaction settings
//!
//! Picking misses, double grabs and double releases are *not* errors; they
//! are ordinary outcomes. Scene-graph corruption discovered during an
//! ancestor walk is a programming error and panics instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_xr::errors::{XrError, Result};
//!
//! fn reparent(scene: &mut Scene, child: NodeHandle, parent: NodeHandle) -> Result<()> {
//!     scene.attach(child, parent)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::NodeHandle;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum XrError {
    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// The handle does not refer to a live node.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    /// A node cannot become its own parent.
    #[error("Cannot attach node {0:?} to itself")]
    SelfAttach(NodeHandle),

    /// The requested parent lives inside the child's subtree.
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Node being re-parented
        child: NodeHandle,
        /// Requested new parent
        parent: NodeHandle,
    },

    // ========================================================================
    // Resource Errors
    // ========================================================================
    /// Geometry index buffer references a vertex that does not exist.
    #[error("Geometry index {index} out of range (vertex count: {vertex_count})")]
    IndexOutOfRange {
        /// Offending index value
        index: u32,
        /// Number of vertices in the geometry
        vertex_count: usize,
    },

    /// Triangle list length is not a multiple of three.
    #[error("Geometry index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    /// Prefab data is internally inconsistent.
    #[error("Invalid prefab: {0}")]
    InvalidPrefab(String),

    // ========================================================================
    // Input & Settings Errors
    // ========================================================================
    /// Event from a device index the context does not know about.
    #[error("Unknown input device: {0}")]
    UnknownDevice(usize),

    /// Settings failed validation.
    #[error("Invalid interaction settings: {0}")]
    InvalidSettings(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, XrError>`.
pub type Result<T> = std::result::Result<T, XrError>;
