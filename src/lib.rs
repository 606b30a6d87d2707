//! # Seam
//!
//! Half-edge topology construction and queries for n-gon polygon soup.
//!
//! Seam ingests polygon records (faces with arbitrary vertex counts, as a
//! loader produces them) and builds an explicit half-edge topology in
//! structure-of-arrays form: every directed edge, its twin on the adjacent
//! face, and representative edges per vertex and per face. The arrays map
//! one-to-one onto GPU storage buffers, and the query layer mirrors the
//! shader-side getters that procedural-geometry stages (subdivision,
//! parametric resurfacing, extrusion) use for adjacency lookups.
//!
//! ## Quick Start
//!
//! ```
//! use seam::prelude::*;
//! use nalgebra::Point3;
//!
//! // A quad and a triangle sharing an edge
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(2.0, 0.5, 0.0),
//! ];
//! let ngon = NgonMesh::from_faces(&positions, &[vec![0, 1, 2, 3], vec![2, 1, 4]]);
//!
//! let mesh = build_from_ngon(&ngon).unwrap();
//! assert_eq!(mesh.num_faces(), 2);
//! assert_eq!(mesh.num_halfedges(), 7);
//!
//! // Walk a face loop
//! let f = FaceId::new(0);
//! for e in mesh.face_halfedges(f) {
//!     assert_eq!(mesh.half_edge_face(e), f);
//! }
//!
//! // Stage the arrays for upload
//! let bindings = MeshBindings::stage(&mesh);
//! assert_eq!(bindings.int_data(seam::gpu::int_slot::FACE_VERT_COUNTS), &[4, 3]);
//! ```
//!
//! ## Boundary and Non-Manifold Input
//!
//! Edges with no opposite face keep a `-1` twin; traversals crossing twins
//! must handle the sentinel. Duplicate directed edges (non-manifold input)
//! are not rejected: they degrade the twin mapping for the affected edges
//! without failing the build. Malformed faces (fewer than three corners,
//! out-of-range vertex references) abort construction with a
//! [`MeshError`](error::MeshError).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod gpu;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use seam::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::gpu::MeshBindings;
    pub use crate::mesh::{
        build_from_ngon, FaceId, HalfEdgeId, HalfEdgeMesh, NgonFace, NgonMesh, NgonVertex,
        VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
