//! Staging of the half-edge SoA arrays for GPU upload.
//!
//! Each logical array of a [`HalfEdgeMesh`] occupies its own read-only
//! storage buffer on the GPU, grouped by element type (vec4, vec2, int,
//! float) and addressed by a fixed slot number inside its group. The
//! shader-side accessor functions index these groups with the same slot
//! constants, so the numbering here is the bit-exact compatibility surface
//! between the topology core and the renderer: reordering or regrouping
//! arrays breaks shader binding without a matching shader update.
//!
//! Buffer/device lifecycle stays with the renderer; this module only
//! produces the per-slot arrays and their byte views.

use bytemuck::Pod;
use nalgebra::{Point2, Point3, Vector3, Vector4};

use crate::mesh::HalfEdgeMesh;

/// Slots of the vec4-typed storage-buffer group.
pub mod vec4_slot {
    /// Vertex positions (w = 1).
    pub const VERTEX_POSITIONS: usize = 0;
    /// Vertex RGBA colors.
    pub const VERTEX_COLORS: usize = 1;
    /// Vertex normals (w = 0).
    pub const VERTEX_NORMALS: usize = 2;
    /// Face normals (w = 0).
    pub const FACE_NORMALS: usize = 3;
    /// Face centers (w = 1).
    pub const FACE_CENTERS: usize = 4;
    /// Number of vec4 slots.
    pub const COUNT: usize = 5;
}

/// Slots of the vec2-typed storage-buffer group.
pub mod vec2_slot {
    /// Vertex texture coordinates.
    pub const VERTEX_TEX_COORDS: usize = 0;
    /// Number of vec2 slots.
    pub const COUNT: usize = 1;
}

/// Slots of the int-typed storage-buffer group.
pub mod int_slot {
    /// Representative half-edge per vertex.
    pub const VERTEX_EDGES: usize = 0;
    /// One bordering half-edge per face.
    pub const FACE_EDGES: usize = 1;
    /// Corner count per face.
    pub const FACE_VERT_COUNTS: usize = 2;
    /// Corner-list offset per face.
    pub const FACE_OFFSETS: usize = 3;
    /// Destination vertex per half-edge.
    pub const HALF_EDGE_VERTEX: usize = 4;
    /// Owning face per half-edge.
    pub const HALF_EDGE_FACE: usize = 5;
    /// Next half-edge in the face loop.
    pub const HALF_EDGE_NEXT: usize = 6;
    /// Previous half-edge in the face loop.
    pub const HALF_EDGE_PREV: usize = 7;
    /// Twin half-edge (-1 on boundaries).
    pub const HALF_EDGE_TWIN: usize = 8;
    /// Flattened per-corner vertex indices.
    pub const VERTEX_FACE_INDICES: usize = 9;
    /// Number of int slots.
    pub const COUNT: usize = 10;
}

/// Slots of the float-typed storage-buffer group.
pub mod float_slot {
    /// Face areas.
    pub const FACE_AREAS: usize = 0;
    /// Number of float slots.
    pub const COUNT: usize = 1;
}

/// The staged per-slot arrays of one mesh, ready for buffer upload.
///
/// vec3-valued attributes are padded to vec4 (w = 1 for points, w = 0 for
/// direction vectors) to match the shader-side `vec4` array declarations.
#[derive(Debug, Clone)]
pub struct MeshBindings {
    vec4: [Vec<[f32; 4]>; vec4_slot::COUNT],
    vec2: [Vec<[f32; 2]>; vec2_slot::COUNT],
    int: [Vec<i32>; int_slot::COUNT],
    float: [Vec<f32>; float_slot::COUNT],
}

impl MeshBindings {
    /// Stage every SoA array of `mesh` into its binding slot.
    pub fn stage(mesh: &HalfEdgeMesh) -> Self {
        let vec4 = [
            pad_points(&mesh.vertices.positions),
            flatten_vec4(&mesh.vertices.colors),
            pad_vectors(&mesh.vertices.normals),
            pad_vectors(&mesh.faces.normals),
            pad_points(&mesh.faces.centers),
        ];
        let vec2 = [flatten_vec2(&mesh.vertices.tex_coords)];
        let int = [
            as_raw_indices(&mesh.vertices.edges),
            as_raw_indices(&mesh.faces.edges),
            mesh.faces.vert_counts.clone(),
            mesh.faces.offsets.clone(),
            as_raw_indices(&mesh.half_edges.vertices),
            as_raw_indices(&mesh.half_edges.faces),
            as_raw_indices(&mesh.half_edges.next),
            as_raw_indices(&mesh.half_edges.prev),
            as_raw_indices(&mesh.half_edges.twins),
            as_raw_indices(&mesh.vertex_face_indices),
        ];
        let float = [mesh.faces.areas.clone()];

        Self {
            vec4,
            vec2,
            int,
            float,
        }
    }

    /// Get the vec4 array staged at `slot` (see [`vec4_slot`]).
    pub fn vec4_data(&self, slot: usize) -> &[[f32; 4]] {
        &self.vec4[slot]
    }

    /// Get the vec2 array staged at `slot` (see [`vec2_slot`]).
    pub fn vec2_data(&self, slot: usize) -> &[[f32; 2]] {
        &self.vec2[slot]
    }

    /// Get the int array staged at `slot` (see [`int_slot`]).
    pub fn int_data(&self, slot: usize) -> &[i32] {
        &self.int[slot]
    }

    /// Get the float array staged at `slot` (see [`float_slot`]).
    pub fn float_data(&self, slot: usize) -> &[f32] {
        &self.float[slot]
    }

    /// Byte view of a vec4 slot, for buffer upload.
    pub fn vec4_bytes(&self, slot: usize) -> &[u8] {
        bytemuck::cast_slice(&self.vec4[slot])
    }

    /// Byte view of a vec2 slot, for buffer upload.
    pub fn vec2_bytes(&self, slot: usize) -> &[u8] {
        bytemuck::cast_slice(&self.vec2[slot])
    }

    /// Byte view of an int slot, for buffer upload.
    pub fn int_bytes(&self, slot: usize) -> &[u8] {
        bytemuck::cast_slice(&self.int[slot])
    }

    /// Byte view of a float slot, for buffer upload.
    pub fn float_bytes(&self, slot: usize) -> &[u8] {
        bytemuck::cast_slice(&self.float[slot])
    }
}

fn pad_points(points: &[Point3<f32>]) -> Vec<[f32; 4]> {
    points.iter().map(|p| [p.x, p.y, p.z, 1.0]).collect()
}

fn pad_vectors(vectors: &[Vector3<f32>]) -> Vec<[f32; 4]> {
    vectors.iter().map(|v| [v.x, v.y, v.z, 0.0]).collect()
}

fn flatten_vec4(values: &[Vector4<f32>]) -> Vec<[f32; 4]> {
    values.iter().map(|v| [v.x, v.y, v.z, v.w]).collect()
}

fn flatten_vec2(values: &[Point2<f32>]) -> Vec<[f32; 2]> {
    values.iter().map(|p| [p.x, p.y]).collect()
}

fn as_raw_indices<T: Pod>(ids: &[T]) -> Vec<i32> {
    bytemuck::cast_slice(ids).to_vec()
}
