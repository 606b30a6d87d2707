//! Half-edge mesh construction from polygon records.
//!
//! The builder is a pure transformation: one pass over the faces creates
//! every half-edge and wires `next`/`prev` inside each face loop, then a
//! stitch pass resolves twins through a directed-edge map. No data is shared
//! with the input record after construction.

use std::collections::HashMap;

use super::halfedge::HalfEdgeMesh;
use super::index::{FaceId, HalfEdgeId, VertexId};
use super::ngon::NgonMesh;
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from an n-gon polygon record.
///
/// Faces are processed in input order; the half-edge directed from corner
/// `i` to corner `(i + 1) % count` of face `f` gets index
/// `face_offset(f) + i`, so the output is deterministic for a given record.
///
/// # Errors
/// Fails if the record has no faces, a face has fewer than three corners,
/// a face descriptor runs past the corner-index array, or a corner
/// references a vertex that does not exist. No partial mesh is returned.
///
/// # Non-manifold input
/// Duplicate *directed* edges (two faces emitting the same ordered corner
/// pair) are not rejected: the later half-edge overwrites the earlier one in
/// the directed-edge map, so one of the duplicates ends up with a wrong or
/// missing twin. Degraded output, not an error.
///
/// # Example
/// ```
/// use seam::prelude::*;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let ngon = NgonMesh::from_faces(&positions, &[vec![0, 1, 2]]);
///
/// let mesh = build_from_ngon(&ngon).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_halfedges(), 3);
/// ```
pub fn build_from_ngon(ngon: &NgonMesh) -> Result<HalfEdgeMesh> {
    if ngon.faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Validate face descriptors and corner indices up front
    for (fi, face) in ngon.faces.iter().enumerate() {
        let count = face.count as usize;
        let offset = face.offset as usize;
        if count < 3 {
            return Err(MeshError::FaceTooSmall { face: fi, count });
        }
        if offset + count > ngon.indices.len() {
            return Err(MeshError::FaceRangeOutOfBounds { face: fi });
        }
        for &vi in &ngon.indices[offset..offset + count] {
            if vi as usize >= ngon.vertices.len() {
                return Err(MeshError::InvalidVertexIndex {
                    face: fi,
                    vertex: vi as usize,
                });
            }
        }
    }

    let mut mesh = HalfEdgeMesh::default();
    let num_corners = ngon.num_corners();

    // Copy vertex attributes; representative edges start at the sentinel
    mesh.vertices.positions.reserve(ngon.vertices.len());
    mesh.vertices.colors.reserve(ngon.vertices.len());
    mesh.vertices.normals.reserve(ngon.vertices.len());
    mesh.vertices.tex_coords.reserve(ngon.vertices.len());
    for v in &ngon.vertices {
        mesh.vertices.positions.push(v.position);
        mesh.vertices.colors.push(v.color);
        mesh.vertices.normals.push(v.normal);
        mesh.vertices.tex_coords.push(v.tex_coord);
    }
    mesh.vertices.edges = vec![HalfEdgeId::invalid(); ngon.vertices.len()];

    // Maps a directed corner pair to the half-edge it created. A recurring
    // pair (non-manifold input) silently overwrites the earlier entry.
    let mut edge_map: HashMap<(u32, u32), usize> = HashMap::with_capacity(num_corners);
    // Directed pair of each half-edge, in creation order, for twin lookup
    let mut half_edge_pairs: Vec<(u32, u32)> = Vec::with_capacity(num_corners);

    // First pass: create all half-edges, faces, and the corner list
    let mut corner_cursor = 0usize;
    for (fi, face) in ngon.faces.iter().enumerate() {
        let count = face.count as usize;
        let offset = face.offset as usize;
        let first = mesh.half_edges.vertices.len();

        mesh.faces.offsets.push(corner_cursor as i32);

        for i in 0..count {
            let src = ngon.indices[offset + i];
            let dst = ngon.indices[offset + (i + 1) % count];
            let he = first + i;

            mesh.half_edges.vertices.push(VertexId::new(dst as usize));
            mesh.half_edges.faces.push(FaceId::new(fi));
            mesh.half_edges.next.push(HalfEdgeId::new(first + (i + 1) % count));
            mesh.half_edges.prev.push(HalfEdgeId::new(first + (i + count - 1) % count));
            mesh.half_edges.twins.push(HalfEdgeId::invalid());

            // The flattened corner list stores per-face origin vertices
            mesh.vertex_face_indices.push(VertexId::new(src as usize));
            corner_cursor += 1;

            edge_map.insert((src, dst), he);
            half_edge_pairs.push((src, dst));
        }

        mesh.faces.edges.push(HalfEdgeId::new(first));
        mesh.faces.vert_counts.push(count as i32);
        mesh.faces.normals.push(face.normal);
        mesh.faces.centers.push(face.center);
        mesh.faces.areas.push(face.area);
    }

    // Second pass: resolve twins through the reverse directed pair.
    // Matched pairs are visited from both sides; the assignment is
    // idempotent. Unmatched edges stay at the sentinel (mesh boundary).
    for (e, &(src, dst)) in half_edge_pairs.iter().enumerate() {
        if let Some(&twin) = edge_map.get(&(dst, src)) {
            mesh.half_edges.twins[e] = HalfEdgeId::new(twin);
            mesh.half_edges.twins[twin] = HalfEdgeId::new(e);
        }
    }

    // Representative vertex edge: the first-created half-edge arriving at
    // each vertex. Note this is an incoming edge, not an outgoing one.
    for e in 0..mesh.half_edges.vertices.len() {
        let dst = mesh.half_edges.vertices[e];
        if !mesh.vertices.edges[dst.index()].is_valid() {
            mesh.vertices.edges[dst.index()] = HalfEdgeId::new(e);
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn single_triangle() -> NgonMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        NgonMesh::from_faces(&positions, &[vec![0, 1, 2]])
    }

    fn two_triangles_shared_edge() -> NgonMesh {
        // A, B, C and A, C, D sharing the edge A-C
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),  // A
            Point3::new(1.0, 0.0, 0.0),  // B
            Point3::new(1.0, 1.0, 0.0),  // C
            Point3::new(0.0, 1.0, 0.0),  // D
        ];
        NgonMesh::from_faces(&positions, &[vec![0, 1, 2], vec![0, 2, 3]])
    }

    #[test]
    fn test_single_triangle_all_boundary() {
        let mesh = build_from_ngon(&single_triangle()).unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_halfedges(), 3);
        assert!(mesh.is_valid());

        for e in mesh.halfedge_ids() {
            assert!(!mesh.half_edge_twin(e).is_valid());
        }
    }

    #[test]
    fn test_two_triangles_twin_resolution() {
        let mesh = build_from_ngon(&two_triangles_shared_edge()).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_halfedges(), 6);
        assert!(mesh.is_valid());

        // Creation order: he0 A->B, he1 B->C, he2 C->A, he3 A->C,
        // he4 C->D, he5 D->A. The shared edge A-C pairs he2 with he3.
        let he2 = HalfEdgeId::new(2);
        let he3 = HalfEdgeId::new(3);
        assert_eq!(mesh.half_edge_twin(he2), he3);
        assert_eq!(mesh.half_edge_twin(he3), he2);

        for e in [0, 1, 4, 5] {
            assert!(!mesh.half_edge_twin(HalfEdgeId::new(e)).is_valid());
        }
    }

    #[test]
    fn test_half_edge_fields() {
        let mesh = build_from_ngon(&two_triangles_shared_edge()).unwrap();

        // he1 is B->C in face 0
        let he1 = HalfEdgeId::new(1);
        assert_eq!(mesh.half_edge_vertex(he1), VertexId::new(2));
        assert_eq!(mesh.half_edge_face(he1), FaceId::new(0));
        assert_eq!(mesh.half_edge_next(he1), HalfEdgeId::new(2));
        assert_eq!(mesh.half_edge_prev(he1), HalfEdgeId::new(0));

        // Corner list stores origin vertices, face by face
        let corners: Vec<i32> = mesh
            .face_ids()
            .flat_map(|f| mesh.face_vertices(f))
            .map(|v| v.raw())
            .collect();
        assert_eq!(corners, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_single_quad() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let ngon = NgonMesh::from_faces(&positions, &[vec![0, 1, 2, 3]]);
        let mesh = build_from_ngon(&ngon).unwrap();
        let f = FaceId::new(0);

        assert_eq!(mesh.face_vert_count(f), 4);
        assert_eq!(mesh.face_offset(f), 0);
        assert_eq!(
            mesh.vertex_position_relative(f, 2),
            Point3::new(1.0, 1.0, 0.0)
        );

        let start = mesh.face_edge(f);
        let mut e = start;
        for _ in 0..4 {
            e = mesh.half_edge_next(e);
        }
        assert_eq!(e, start);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_representative_edge_is_incoming() {
        let mesh = build_from_ngon(&single_triangle()).unwrap();

        // First-created half-edge arriving at each vertex:
        // he0 (0->1) for v1, he1 (1->2) for v2, he2 (2->0) for v0
        assert_eq!(mesh.vertex_edge(VertexId::new(1)), HalfEdgeId::new(0));
        assert_eq!(mesh.vertex_edge(VertexId::new(2)), HalfEdgeId::new(1));
        assert_eq!(mesh.vertex_edge(VertexId::new(0)), HalfEdgeId::new(2));

        for v in mesh.vertex_ids() {
            assert_eq!(mesh.half_edge_vertex(mesh.vertex_edge(v)), v);
        }
    }

    #[test]
    fn test_triangle_fan_valence_is_face_corner_count() {
        // Closed fan of 4 triangles around a center vertex. The walk along
        // `next` stays inside the representative face, so the center
        // reports 3 corners, not its 4 incident faces.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),  // center
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
        ];
        let ngon = NgonMesh::from_faces(
            &positions,
            &[vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4], vec![0, 4, 1]],
        );
        let mesh = build_from_ngon(&ngon).unwrap();
        assert!(mesh.is_valid());

        let center = VertexId::new(0);
        assert_eq!(mesh.vertex_valence(center), 3);
        assert_eq!(mesh.face_valence_of_vertex(center), 3);
    }

    #[test]
    fn test_duplicate_directed_edge_degrades_without_crash() {
        // Faces 0 and 1 both emit the directed edge 0->1; face 2 emits the
        // reverse 1->0. The later 0->1 entry overwrites the earlier one in
        // the directed-edge map, so only one of the duplicates is
        // discoverable: the reverse edge twins with the later duplicate and
        // the earlier one keeps a stale, non-mutual twin.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(1.5, 0.5, 0.0),
        ];
        let ngon = NgonMesh::from_faces(
            &positions,
            &[vec![0, 1, 2], vec![0, 1, 3], vec![1, 0, 4]],
        );
        let mesh = build_from_ngon(&ngon).unwrap();

        let first_dup = HalfEdgeId::new(0); // 0->1 in face 0
        let second_dup = HalfEdgeId::new(3); // 0->1 in face 1
        let reverse = HalfEdgeId::new(6); // 1->0 in face 2

        // Both duplicates found the reverse edge...
        assert_eq!(mesh.half_edge_twin(first_dup), reverse);
        assert_eq!(mesh.half_edge_twin(second_dup), reverse);
        // ...but the reverse edge only twins with the surviving map entry
        assert_eq!(mesh.half_edge_twin(reverse), second_dup);

        // Degraded, not crashed: the involution invariant no longer holds
        assert!(!mesh.is_valid());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let ngon = two_triangles_shared_edge();
        let first = build_from_ngon(&ngon).unwrap();
        let second = build_from_ngon(&ngon).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_record() {
        let ngon = NgonMesh::default();
        assert!(matches!(build_from_ngon(&ngon), Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_face_too_small() {
        let mut ngon = single_triangle();
        ngon.faces[0].count = 2;
        ngon.indices.truncate(2);
        let err = build_from_ngon(&ngon).unwrap_err();
        assert!(matches!(err, MeshError::FaceTooSmall { face: 0, count: 2 }));
    }

    #[test]
    fn test_face_range_out_of_bounds() {
        let mut ngon = single_triangle();
        ngon.faces[0].count = 4;
        let err = build_from_ngon(&ngon).unwrap_err();
        assert!(matches!(err, MeshError::FaceRangeOutOfBounds { face: 0 }));
    }

    #[test]
    fn test_invalid_vertex_index() {
        let mut ngon = single_triangle();
        ngon.indices[1] = 9;
        let err = build_from_ngon(&ngon).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidVertexIndex { face: 0, vertex: 9 }
        ));
    }

    #[test]
    fn test_closed_quad_cube() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // bottom
            vec![4, 5, 6, 7], // top
            vec![0, 1, 5, 4], // front
            vec![1, 2, 6, 5], // right
            vec![2, 3, 7, 6], // back
            vec![3, 0, 4, 7], // left
        ];
        let ngon = NgonMesh::from_faces(&positions, &faces);
        let mesh = build_from_ngon(&ngon).unwrap();

        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_halfedges(), 24);
        assert!(mesh.is_valid());

        // Closed mesh: every half-edge has a mutual twin
        for e in mesh.halfedge_ids() {
            let twin = mesh.half_edge_twin(e);
            assert!(twin.is_valid());
            assert_eq!(mesh.half_edge_twin(twin), e);
            assert_ne!(mesh.half_edge_face(twin), mesh.half_edge_face(e));
        }
    }
}
