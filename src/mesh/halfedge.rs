//! Half-edge mesh data structure, structure-of-arrays layout.
//!
//! Every directed polygon edge is one **half-edge**: it knows the vertex it
//! arrives at, the face it borders, the next and previous half-edges around
//! that face, and its **twin** on the adjacent face (or the `-1` sentinel on
//! a mesh boundary). Each attribute lives in its own contiguous array so the
//! whole mesh maps one-to-one onto read-only GPU storage buffers; the
//! accessor functions here are mirrored verbatim by the shader-side getters
//! that walk the same arrays.
//!
//! # Boundary Handling
//!
//! An edge with no opposite face keeps `twin == -1`. Traversals that assume
//! a closed manifold (anything crossing twins) must handle the sentinel.

use nalgebra::{Point2, Point3, Vector3, Vector4};

use super::index::{FaceId, HalfEdgeId, VertexId};

/// Per-vertex attribute arrays, indexed by vertex id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexData {
    /// Vertex positions.
    pub(crate) positions: Vec<Point3<f32>>,
    /// Vertex RGBA colors.
    pub(crate) colors: Vec<Vector4<f32>>,
    /// Vertex normals.
    pub(crate) normals: Vec<Vector3<f32>>,
    /// Vertex texture coordinates.
    pub(crate) tex_coords: Vec<Point2<f32>>,
    /// One representative half-edge per vertex: the first-created half-edge
    /// that *arrives* at the vertex. Sentinel for vertices no face uses.
    pub(crate) edges: Vec<HalfEdgeId>,
}

/// Per-face attribute arrays, indexed by face id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceData {
    /// One half-edge bordering each face.
    pub(crate) edges: Vec<HalfEdgeId>,
    /// Number of corners of each face (>= 3).
    pub(crate) vert_counts: Vec<i32>,
    /// Start of each face's corner list in the vertex-face-index array.
    pub(crate) offsets: Vec<i32>,
    /// Face normals (copied from the polygon record).
    pub(crate) normals: Vec<Vector3<f32>>,
    /// Face centers (copied from the polygon record).
    pub(crate) centers: Vec<Point3<f32>>,
    /// Face areas (copied from the polygon record).
    pub(crate) areas: Vec<f32>,
}

/// Per-half-edge connectivity arrays, indexed by half-edge id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HalfEdgeData {
    /// Destination vertex of each half-edge.
    pub(crate) vertices: Vec<VertexId>,
    /// Face owning each half-edge.
    pub(crate) faces: Vec<FaceId>,
    /// Next half-edge in the same face loop.
    pub(crate) next: Vec<HalfEdgeId>,
    /// Previous half-edge in the same face loop.
    pub(crate) prev: Vec<HalfEdgeId>,
    /// Oppositely directed half-edge on the adjacent face, or sentinel.
    pub(crate) twins: Vec<HalfEdgeId>,
}

/// A half-edge mesh in structure-of-arrays form.
///
/// Built once by [`build_from_ngon`](crate::mesh::build_from_ngon) and
/// immutable afterwards; independent meshes can be built in parallel since
/// no state is shared between builds or with the input record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HalfEdgeMesh {
    /// All vertex data split into SoA.
    pub(crate) vertices: VertexData,
    /// All face data split into SoA.
    pub(crate) faces: FaceData,
    /// All half-edge data split into SoA.
    pub(crate) half_edges: HalfEdgeData,
    /// Flattened per-corner vertex indices: face `f`'s corner `i` is at
    /// `face_offset(f) + i` and stores the corner's *origin* vertex.
    pub(crate) vertex_face_indices: Vec<VertexId>,
}

impl HalfEdgeMesh {
    // ==================== Counts ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.positions.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.edges.len()
    }

    /// Get the number of half-edges (the total corner count of all faces).
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.half_edges.vertices.len()
    }

    // ==================== Vertex Queries ====================

    /// Get the position of a vertex.
    #[inline]
    pub fn vertex_position(&self, v: VertexId) -> Point3<f32> {
        self.vertices.positions[v.index()]
    }

    /// Get the color of a vertex.
    #[inline]
    pub fn vertex_color(&self, v: VertexId) -> Vector4<f32> {
        self.vertices.colors[v.index()]
    }

    /// Get the normal of a vertex.
    #[inline]
    pub fn vertex_normal(&self, v: VertexId) -> Vector3<f32> {
        self.vertices.normals[v.index()]
    }

    /// Get the texture coordinate of a vertex.
    #[inline]
    pub fn vertex_tex_coord(&self, v: VertexId) -> Point2<f32> {
        self.vertices.tex_coords[v.index()]
    }

    /// Get the representative half-edge of a vertex: the first-created
    /// half-edge arriving at it. Sentinel if no face references the vertex.
    #[inline]
    pub fn vertex_edge(&self, v: VertexId) -> HalfEdgeId {
        self.vertices.edges[v.index()]
    }

    // ==================== Face Queries ====================

    /// Get one half-edge bordering a face.
    #[inline]
    pub fn face_edge(&self, f: FaceId) -> HalfEdgeId {
        self.faces.edges[f.index()]
    }

    /// Get the number of corners of a face.
    #[inline]
    pub fn face_vert_count(&self, f: FaceId) -> usize {
        self.faces.vert_counts[f.index()] as usize
    }

    /// Get the start of a face's corner list in the vertex-face-index array.
    #[inline]
    pub fn face_offset(&self, f: FaceId) -> usize {
        self.faces.offsets[f.index()] as usize
    }

    /// Get the normal of a face.
    #[inline]
    pub fn face_normal(&self, f: FaceId) -> Vector3<f32> {
        self.faces.normals[f.index()]
    }

    /// Get the center of a face.
    #[inline]
    pub fn face_center(&self, f: FaceId) -> Point3<f32> {
        self.faces.centers[f.index()]
    }

    /// Get the area of a face.
    #[inline]
    pub fn face_area(&self, f: FaceId) -> f32 {
        self.faces.areas[f.index()]
    }

    // ==================== Half-Edge Queries ====================

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn half_edge_vertex(&self, e: HalfEdgeId) -> VertexId {
        self.half_edges.vertices[e.index()]
    }

    /// Get the face owning a half-edge.
    #[inline]
    pub fn half_edge_face(&self, e: HalfEdgeId) -> FaceId {
        self.half_edges.faces[e.index()]
    }

    /// Get the next half-edge around the owning face.
    #[inline]
    pub fn half_edge_next(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges.next[e.index()]
    }

    /// Get the previous half-edge around the owning face.
    #[inline]
    pub fn half_edge_prev(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges.prev[e.index()]
    }

    /// Get the twin of a half-edge, or the sentinel on a mesh boundary.
    #[inline]
    pub fn half_edge_twin(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges.twins[e.index()]
    }

    /// Check if a half-edge borders a mesh boundary (has no twin).
    #[inline]
    pub fn is_boundary_halfedge(&self, e: HalfEdgeId) -> bool {
        !self.half_edge_twin(e).is_valid()
    }

    // ==================== Face-Relative Queries ====================

    /// Get the origin vertex of corner `rel` of face `f`.
    ///
    /// `rel` must be `< face_vert_count(f)`.
    #[inline]
    pub fn face_vertex_at(&self, f: FaceId, rel: usize) -> VertexId {
        debug_assert!(rel < self.face_vert_count(f));
        self.vertex_face_indices[self.face_offset(f) + rel]
    }

    /// Get the position of corner `rel` of face `f`.
    ///
    /// This composition of [`face_vertex_at`](Self::face_vertex_at) with a
    /// vertex accessor is the exact pattern GPU mesh-shader stages use to
    /// fetch a face's corners without per-corner branching.
    #[inline]
    pub fn vertex_position_relative(&self, f: FaceId, rel: usize) -> Point3<f32> {
        self.vertex_position(self.face_vertex_at(f, rel))
    }

    /// Get the texture coordinate of corner `rel` of face `f`.
    #[inline]
    pub fn vertex_tex_coord_relative(&self, f: FaceId, rel: usize) -> Point2<f32> {
        self.vertex_tex_coord(self.face_vertex_at(f, rel))
    }

    /// Get the normal of corner `rel` of face `f`.
    #[inline]
    pub fn vertex_normal_relative(&self, f: FaceId, rel: usize) -> Vector3<f32> {
        self.vertex_normal(self.face_vertex_at(f, rel))
    }

    /// Get the vertex id of corner `rel` of face `f`.
    #[inline]
    pub fn vertex_id_relative(&self, f: FaceId, rel: usize) -> VertexId {
        self.face_vertex_at(f, rel)
    }

    // ==================== Valence Queries ====================

    /// Get the face bordered by a vertex's representative half-edge.
    ///
    /// The vertex must be referenced by at least one face.
    #[inline]
    pub fn face_of_vertex(&self, v: VertexId) -> FaceId {
        self.half_edge_face(self.vertex_edge(v))
    }

    /// Get the corner count of a face.
    #[inline]
    pub fn face_valence_of_face(&self, f: FaceId) -> usize {
        self.face_vert_count(f)
    }

    /// Get the corner count of the face bordered by a vertex's
    /// representative half-edge.
    #[inline]
    pub fn face_valence_of_vertex(&self, v: VertexId) -> usize {
        self.face_vert_count(self.face_of_vertex(v))
    }

    /// Walk `next` from the vertex's representative half-edge until the walk
    /// returns to its start, counting steps.
    ///
    /// `next` never crosses a twin, so the walk stays inside a single face
    /// loop: the result is the corner count of the face containing the
    /// representative half-edge, *not* the number of distinct edges incident
    /// to the vertex. The shader-side getter performs the identical walk and
    /// the two must stay in lockstep.
    pub fn vertex_valence(&self, v: VertexId) -> usize {
        let start = self.vertex_edge(v);
        let mut e = start;
        let mut valence = 0;
        loop {
            valence += 1;
            e = self.half_edge_next(e);
            if e == start {
                break;
            }
        }
        valence
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.num_vertices()).map(VertexId::new)
    }

    /// Iterate over all half-edge ids.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.num_halfedges()).map(HalfEdgeId::new)
    }

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.num_faces()).map(FaceId::new)
    }

    /// Iterate over the half-edges of a face, starting at `face_edge(f)`.
    pub fn face_halfedges(&self, f: FaceId) -> FaceHalfEdgeIter<'_> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over the origin vertices of a face's corners, in input order.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.face_vert_count(f)).map(move |rel| self.face_vertex_at(f, rel))
    }

    // ==================== Validation ====================

    /// Check that all connectivity invariants hold.
    ///
    /// For every face of size `k`: walking `next` exactly `k` times returns
    /// to the start, `prev` undoes `next`, and every half-edge on the loop
    /// reports the face. Twins are mutual where present. The corner-count
    /// total matches both the vertex-face-index array and the half-edge
    /// count, face offsets are contiguous, and every referenced vertex has a
    /// representative half-edge that arrives at it.
    pub fn is_valid(&self) -> bool {
        let he = &self.half_edges;
        if he.faces.len() != he.vertices.len()
            || he.next.len() != he.vertices.len()
            || he.prev.len() != he.vertices.len()
            || he.twins.len() != he.vertices.len()
        {
            return false;
        }

        // Count identity and contiguous face layout
        let total: i32 = self.faces.vert_counts.iter().sum();
        if total as usize != self.vertex_face_indices.len()
            || total as usize != self.num_halfedges()
        {
            return false;
        }
        let mut expected_offset = 0;
        for f in self.face_ids() {
            if self.faces.offsets[f.index()] != expected_offset {
                return false;
            }
            expected_offset += self.faces.vert_counts[f.index()];
        }

        // Face loops close under `next` in exactly `vert_count` steps
        for f in self.face_ids() {
            let k = self.face_vert_count(f);
            let start = self.face_edge(f);
            let mut e = start;
            for _ in 0..k {
                if self.half_edge_face(e) != f {
                    return false;
                }
                let next = self.half_edge_next(e);
                if self.half_edge_prev(next) != e {
                    return false;
                }
                e = next;
            }
            if e != start {
                return false;
            }
        }

        // Twin involution
        for e in self.halfedge_ids() {
            let twin = self.half_edge_twin(e);
            if twin.is_valid() && self.half_edge_twin(twin) != e {
                return false;
            }
        }

        // Every vertex used as a corner has an incoming representative edge
        for &v in &self.vertex_face_indices {
            let edge = self.vertex_edge(v);
            if !edge.is_valid() || self.half_edge_vertex(edge) != v {
                return false;
            }
        }

        true
    }
}

/// Iterator over the half-edges of one face loop.
pub struct FaceHalfEdgeIter<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> FaceHalfEdgeIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, f: FaceId) -> Self {
        let start = mesh.face_edge(f);
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a> Iterator for FaceHalfEdgeIter<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.half_edge_next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}
