//! Error types for seam.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh construction.
///
/// All of these are precondition violations: the builder refuses the input
/// outright and never returns a partially constructed mesh. Downstream GPU
/// traversal performs no bounds checking, so a silently corrupt topology
/// would be undefined behavior at that layer.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The polygon record has no faces.
    #[error("polygon record has no faces")]
    EmptyMesh,

    /// A face has fewer than three corners.
    #[error("face {face} has only {count} corners (minimum is 3)")]
    FaceTooSmall {
        /// The face index.
        face: usize,
        /// The number of corners the face declared.
        count: usize,
    },

    /// A face descriptor points past the end of the corner-index array.
    #[error("face {face} descriptor extends past the corner-index array")]
    FaceRangeOutOfBounds {
        /// The face index.
        face: usize,
    },

    /// A face corner references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },
}
