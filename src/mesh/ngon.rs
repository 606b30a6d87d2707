//! Polygon record: the n-gon input to the half-edge builder.
//!
//! A polygon record is the immutable value type produced by an external
//! loader: a vertex list, a flattened corner-index array, and per-face
//! descriptors pointing into it. Faces may have any number of corners >= 3.
//! The builder consumes this record without mutating it.

use nalgebra::{Point2, Point3, Vector3, Vector4};

/// A single input vertex with its per-vertex attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NgonVertex {
    /// The 3D position of this vertex.
    pub position: Point3<f32>,
    /// The RGBA color of this vertex.
    pub color: Vector4<f32>,
    /// The vertex normal.
    pub normal: Vector3<f32>,
    /// The 2D texture coordinate.
    pub tex_coord: Point2<f32>,
}

impl NgonVertex {
    /// Create a vertex at the given position with default attributes
    /// (white color, zero normal, zero texture coordinate).
    pub fn at(position: Point3<f32>) -> Self {
        Self {
            position,
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
            normal: Vector3::zeros(),
            tex_coord: Point2::origin(),
        }
    }
}

/// Descriptor for one n-gon face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NgonFace {
    /// Start of this face's corner list inside [`NgonMesh::indices`].
    pub offset: u32,
    /// Number of corners (>= 3).
    pub count: u32,
    /// Precomputed face normal.
    pub normal: Vector3<f32>,
    /// Precomputed face center.
    pub center: Point3<f32>,
    /// Precomputed face area.
    pub area: f32,
}

/// An n-gon mesh as produced by a loader: polygon soup with arbitrary
/// per-face vertex counts.
///
/// Face `f` spans `indices[f.offset .. f.offset + f.count]`, and faces are
/// laid out back to back: `faces[i].offset + faces[i].count ==
/// faces[i + 1].offset`, with the last face ending at `indices.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NgonMesh {
    /// All vertices, referenced by 0-based index.
    pub vertices: Vec<NgonVertex>,
    /// Flattened corner-index array, one entry per face corner.
    pub indices: Vec<u32>,
    /// One descriptor per face.
    pub faces: Vec<NgonFace>,
}

impl NgonMesh {
    /// Build a polygon record from vertex positions and per-face corner
    /// lists, computing the per-face attributes a loader would precompute:
    /// normal and area via Newell's method, center as the corner average.
    ///
    /// Vertices get default attributes (see [`NgonVertex::at`]). Corner
    /// indices must reference `positions`.
    pub fn from_faces(positions: &[Point3<f32>], faces: &[Vec<usize>]) -> Self {
        let vertices: Vec<NgonVertex> = positions.iter().map(|&p| NgonVertex::at(p)).collect();

        let mut indices = Vec::with_capacity(faces.iter().map(Vec::len).sum());
        let mut descriptors = Vec::with_capacity(faces.len());

        for corners in faces {
            let offset = indices.len() as u32;
            indices.extend(corners.iter().map(|&c| c as u32));

            let k = corners.len();
            let mut newell = Vector3::zeros();
            let mut center = Vector3::zeros();
            for i in 0..k {
                let a = positions[corners[i]];
                let b = positions[corners[(i + 1) % k]];
                newell.x += (a.y - b.y) * (a.z + b.z);
                newell.y += (a.z - b.z) * (a.x + b.x);
                newell.z += (a.x - b.x) * (a.y + b.y);
                center += a.coords;
            }
            let area = 0.5 * newell.norm();
            let normal = if area > 0.0 {
                newell.normalize()
            } else {
                Vector3::zeros()
            };

            descriptors.push(NgonFace {
                offset,
                count: k as u32,
                normal,
                center: Point3::from(center / k as f32),
                area,
            });
        }

        Self {
            vertices,
            indices,
            faces: descriptors,
        }
    }

    /// Total number of face corners (equals the half-edge count of the
    /// mesh built from this record).
    pub fn num_corners(&self) -> usize {
        self.indices.len()
    }

    /// Check the face descriptor layout: faces are contiguous in
    /// construction order and together cover the whole corner-index array.
    pub fn is_consistent(&self) -> bool {
        let mut expected_offset = 0u32;
        for face in &self.faces {
            if face.offset != expected_offset {
                return false;
            }
            expected_offset += face.count;
        }
        expected_offset as usize == self.indices.len()
    }
}
