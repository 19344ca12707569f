//! Minimal in-memory tetrahedral topology.
//!
//! `TetMesh` stores exactly what [`MeshTopology`] exposes: vertex tags, ridge
//! normals, tetrahedron connectivity, per-edge roles and boundary faces. It is
//! meant for drivers that keep their own mesh elsewhere and for tests.

use crate::mesh_error::MeshMetricError;
use crate::topology::oracle::MeshTopology;
use crate::topology::point::PointId;
use crate::topology::tags::{EdgeRole, PointTags, RidgeNormals};
use crate::topology::tetra::FACE_EDGES;

#[derive(Clone, Debug, Default)]
struct VertexRecord {
    tags: PointTags,
    normals: Option<RidgeNormals>,
}

#[derive(Clone, Debug)]
struct TetraRecord {
    vertices: [PointId; 4],
    edge_roles: [EdgeRole; 6],
    boundary_faces: [bool; 4],
}

/// In-memory tetrahedral mesh topology with 1-based ids.
#[derive(Clone, Debug, Default)]
pub struct TetMesh {
    vertices: Vec<VertexRecord>,
    tetras: Vec<TetraRecord>,
}

impl TetMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of tetrahedra.
    pub fn num_tetras(&self) -> usize {
        self.tetras.len()
    }

    /// Adds a vertex with `tags` and returns its id.
    pub fn add_vertex(&mut self, tags: PointTags) -> PointId {
        self.vertices.push(VertexRecord {
            tags,
            normals: None,
        });
        Self::id_of(self.vertices.len())
    }

    /// Adds a ridge vertex carrying its two normals.
    pub fn add_ridge_vertex(&mut self, tags: PointTags, normals: RidgeNormals) -> PointId {
        self.vertices.push(VertexRecord {
            tags: tags | PointTags::RIDGE,
            normals: Some(normals),
        });
        Self::id_of(self.vertices.len())
    }

    /// Adds a tetrahedron with all edges internal and no boundary face.
    pub fn add_tetra(&mut self, vertices: [PointId; 4]) -> Result<PointId, MeshMetricError> {
        for v in vertices {
            self.vertex(v)?;
        }
        self.tetras.push(TetraRecord {
            vertices,
            edge_roles: [EdgeRole::Internal; 6],
            boundary_faces: [false; 4],
        });
        Ok(Self::id_of(self.tetras.len()))
    }

    /// Overrides the role of one local edge.
    pub fn set_edge_role(
        &mut self,
        tetra: PointId,
        edge: usize,
        role: EdgeRole,
    ) -> Result<(), MeshMetricError> {
        let record = self.tetra_mut(tetra)?;
        let slot = record
            .edge_roles
            .get_mut(edge)
            .ok_or(MeshMetricError::InvalidLocalEdge(edge))?;
        *slot = role;
        Ok(())
    }

    /// Tags face `face` as boundary; its internal edges become boundary edges.
    pub fn mark_boundary_face(&mut self, tetra: PointId, face: usize) -> Result<(), MeshMetricError> {
        let record = self.tetra_mut(tetra)?;
        let flag = record
            .boundary_faces
            .get_mut(face)
            .ok_or(MeshMetricError::InvalidLocalFace(face))?;
        *flag = true;
        for &edge in &FACE_EDGES[face] {
            if record.edge_roles[edge] == EdgeRole::Internal {
                record.edge_roles[edge] = EdgeRole::Boundary;
            }
        }
        Ok(())
    }

    fn id_of(len: usize) -> PointId {
        PointId::new(len as u64).unwrap_or_else(|_| unreachable!("ids are 1-based"))
    }

    fn vertex(&self, point: PointId) -> Result<&VertexRecord, MeshMetricError> {
        self.vertices
            .get(point.index() - 1)
            .ok_or(MeshMetricError::UnknownPoint(point))
    }

    fn tetra(&self, tetra: PointId) -> Result<&TetraRecord, MeshMetricError> {
        self.tetras
            .get(tetra.index() - 1)
            .ok_or(MeshMetricError::UnknownTetra(tetra))
    }

    fn tetra_mut(&mut self, tetra: PointId) -> Result<&mut TetraRecord, MeshMetricError> {
        self.tetras
            .get_mut(tetra.index() - 1)
            .ok_or(MeshMetricError::UnknownTetra(tetra))
    }
}

impl MeshTopology for TetMesh {
    fn tetra_vertices(&self, tetra: PointId) -> Result<[PointId; 4], MeshMetricError> {
        Ok(self.tetra(tetra)?.vertices)
    }

    fn edge_role(&self, tetra: PointId, edge: usize) -> Result<EdgeRole, MeshMetricError> {
        self.tetra(tetra)?
            .edge_roles
            .get(edge)
            .copied()
            .ok_or(MeshMetricError::InvalidLocalEdge(edge))
    }

    fn face_is_boundary(&self, tetra: PointId, face: usize) -> Result<bool, MeshMetricError> {
        self.tetra(tetra)?
            .boundary_faces
            .get(face)
            .copied()
            .ok_or(MeshMetricError::InvalidLocalFace(face))
    }

    fn point_tags(&self, point: PointId) -> Result<PointTags, MeshMetricError> {
        Ok(self.vertex(point)?.tags)
    }

    fn ridge_normals(&self, point: PointId) -> Option<RidgeNormals> {
        self.vertex(point).ok().and_then(|v| v.normals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::tetra::tet_to_tri;

    fn unit_tetra() -> (TetMesh, PointId) {
        let mut mesh = TetMesh::new();
        let v: Vec<_> = (0..4).map(|_| mesh.add_vertex(PointTags::empty())).collect();
        let t = mesh.add_tetra([v[0], v[1], v[2], v[3]]).unwrap();
        (mesh, t)
    }

    #[test]
    fn boundary_face_promotes_its_edges() {
        let (mut mesh, t) = unit_tetra();
        mesh.set_edge_role(t, 5, EdgeRole::Ridge).unwrap();
        mesh.mark_boundary_face(t, 0).unwrap();
        assert!(mesh.face_is_boundary(t, 0).unwrap());
        assert!(!mesh.face_is_boundary(t, 1).unwrap());
        assert_eq!(mesh.edge_role(t, 5).unwrap(), EdgeRole::Ridge);
        assert_eq!(mesh.edge_role(t, 4).unwrap(), EdgeRole::Boundary);
        assert_eq!(mesh.edge_role(t, 3).unwrap(), EdgeRole::Boundary);
        assert_eq!(mesh.edge_role(t, 0).unwrap(), EdgeRole::Internal);
    }

    #[test]
    fn unknown_entities_are_errors() {
        let (mesh, _) = unit_tetra();
        let missing = PointId::new(9).unwrap();
        assert_eq!(
            mesh.tetra_vertices(missing),
            Err(MeshMetricError::UnknownTetra(missing))
        );
        assert_eq!(
            mesh.point_tags(missing),
            Err(MeshMetricError::UnknownPoint(missing))
        );
        let mut mesh = mesh;
        assert!(mesh.add_tetra([missing; 4]).is_err());
    }

    #[test]
    fn triangle_follows_face_orientation() {
        let (mut mesh, t) = unit_tetra();
        mesh.mark_boundary_face(t, 1).unwrap();
        let tri = tet_to_tri(&mesh, t, 1).unwrap();
        let v = mesh.tetra_vertices(t).unwrap();
        assert_eq!(tri.vertices, [v[0], v[3], v[2]]);
        assert_eq!(tri.edge_roles, [EdgeRole::Boundary; 3]);
        assert_eq!(tri.edge_endpoints(0).unwrap(), [v[3], v[2]]);
    }
}
