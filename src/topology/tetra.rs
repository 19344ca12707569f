//! Local numbering of tetrahedron edges and faces.
//!
//! Vertices are numbered `0..4`. Face `i` is the face opposite vertex `i`,
//! with its vertices listed so that the face normal points outward. Edge `j`
//! of face `i` is the triangle edge opposite the `j`-th face vertex.

use crate::mesh_error::MeshMetricError;
use crate::topology::oracle::MeshTopology;
use crate::topology::point::PointId;
use crate::topology::tags::EdgeRole;

/// Local edge → its two local vertices.
pub const EDGE_VERTICES: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// Local face → its three local vertices (face `i` opposite vertex `i`).
pub const FACE_VERTICES: [[usize; 3]; 4] = [[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]];

/// Local face → its three local edges, edge `j` opposite face vertex `j`.
pub const FACE_EDGES: [[usize; 3]; 4] = [[5, 4, 3], [5, 1, 2], [4, 2, 0], [3, 0, 1]];

/// Local edge → the two faces sharing it.
pub const EDGE_FACES: [[usize; 2]; 6] = [[2, 3], [1, 3], [1, 2], [0, 3], [0, 2], [0, 1]];

/// Returns the two local vertices of edge `edge`.
#[inline]
pub fn edge_vertices(edge: usize) -> Result<[usize; 2], MeshMetricError> {
    EDGE_VERTICES
        .get(edge)
        .copied()
        .ok_or(MeshMetricError::InvalidLocalEdge(edge))
}

/// Returns the two faces adjacent to edge `edge`.
#[inline]
pub fn edge_faces(edge: usize) -> Result<[usize; 2], MeshMetricError> {
    EDGE_FACES
        .get(edge)
        .copied()
        .ok_or(MeshMetricError::InvalidLocalEdge(edge))
}

/// Local index, inside face `face`, of tetrahedron edge `edge`.
///
/// `None` when the edge does not belong to the face.
pub fn face_local_edge(face: usize, edge: usize) -> Option<usize> {
    FACE_EDGES
        .get(face)?
        .iter()
        .position(|&candidate| candidate == edge)
}

/// Boundary triangle extracted from one face of a tetrahedron.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryTriangle {
    /// Tetrahedron the triangle was taken from.
    pub tetra: PointId,
    /// Local face index in that tetrahedron.
    pub face: usize,
    /// Triangle vertices, in face orientation.
    pub vertices: [PointId; 3],
    /// Role of triangle edge `j` (opposite `vertices[j]`).
    pub edge_roles: [EdgeRole; 3],
}

impl BoundaryTriangle {
    /// Endpoints of triangle edge `local_edge`, ordered as the edge is traversed.
    pub fn edge_endpoints(&self, local_edge: usize) -> Result<[PointId; 2], MeshMetricError> {
        if local_edge >= 3 {
            return Err(MeshMetricError::InvalidLocalEdge(local_edge));
        }
        Ok([
            self.vertices[(local_edge + 1) % 3],
            self.vertices[(local_edge + 2) % 3],
        ])
    }
}

/// Builds the 2-D boundary triangle of face `face` of tetrahedron `tetra`.
pub fn tet_to_tri<M>(mesh: &M, tetra: PointId, face: usize) -> Result<BoundaryTriangle, MeshMetricError>
where
    M: MeshTopology + ?Sized,
{
    let local = FACE_VERTICES
        .get(face)
        .ok_or(MeshMetricError::InvalidLocalFace(face))?;
    let tet_vertices = mesh.tetra_vertices(tetra)?;
    let mut edge_roles = [EdgeRole::Internal; 3];
    for (role, &edge) in edge_roles.iter_mut().zip(FACE_EDGES[face].iter()) {
        *role = mesh.edge_role(tetra, edge)?;
    }
    Ok(BoundaryTriangle {
        tetra,
        face,
        vertices: [
            tet_vertices[local[0]],
            tet_vertices[local[1]],
            tet_vertices[local[2]],
        ],
        edge_roles,
    })
}
