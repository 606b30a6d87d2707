//! Core mesh data structures.
//!
//! This module provides the polygon-record input type, the half-edge
//! builder, and the structure-of-arrays half-edge mesh it produces.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`]: an explicit, traversable half-edge
//! topology over n-gon faces, stored as parallel index arrays so it can be
//! uploaded array-for-array into GPU storage buffers. It is produced from an
//! [`NgonMesh`] polygon record by [`build_from_ngon`] and is immutable
//! afterwards.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers over `i32` with
//! `-1` as the sentinel:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! # Construction
//!
//! ```
//! use seam::mesh::{build_from_ngon, NgonMesh};
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let ngon = NgonMesh::from_faces(&positions, &[vec![0, 1, 2]]);
//!
//! let mesh = build_from_ngon(&ngon).unwrap();
//! assert!(mesh.is_valid());
//! ```

mod builder;
mod halfedge;
mod index;
mod ngon;

pub use builder::build_from_ngon;
pub use halfedge::{FaceData, FaceHalfEdgeIter, HalfEdgeData, HalfEdgeMesh, VertexData};
pub use index::{FaceId, HalfEdgeId, VertexId, INVALID_INDEX};
pub use ngon::{NgonFace, NgonMesh, NgonVertex};
