//! Read-only view of the mesh topology consumed by the interpolation routines.

use crate::mesh_error::MeshMetricError;
use crate::topology::point::PointId;
use crate::topology::tags::{EdgeRole, PointTags, RidgeNormals};

/// Topology oracle: everything the metric interpolation needs to know about
/// the mesh, and nothing it may change.
///
/// Implementations must be consistent for the duration of one interpolation
/// batch; no structural modification may be in flight while it runs.
pub trait MeshTopology {
    /// The four vertices of `tetra`, in local order.
    fn tetra_vertices(&self, tetra: PointId) -> Result<[PointId; 4], MeshMetricError>;

    /// Role of local edge `edge` (`0..6`) of `tetra`.
    fn edge_role(&self, tetra: PointId, edge: usize) -> Result<EdgeRole, MeshMetricError>;

    /// Whether local face `face` (`0..4`) of `tetra` is tagged boundary.
    fn face_is_boundary(&self, tetra: PointId, face: usize) -> Result<bool, MeshMetricError>;

    /// Tags of vertex `point`.
    fn point_tags(&self, point: PointId) -> Result<PointTags, MeshMetricError>;

    /// The normal pair of a ridge vertex, `None` for any other vertex.
    fn ridge_normals(&self, point: PointId) -> Option<RidgeNormals>;
}

impl<T: MeshTopology + ?Sized> MeshTopology for &T {
    fn tetra_vertices(&self, tetra: PointId) -> Result<[PointId; 4], MeshMetricError> {
        (**self).tetra_vertices(tetra)
    }

    fn edge_role(&self, tetra: PointId, edge: usize) -> Result<EdgeRole, MeshMetricError> {
        (**self).edge_role(tetra, edge)
    }

    fn face_is_boundary(&self, tetra: PointId, face: usize) -> Result<bool, MeshMetricError> {
        (**self).face_is_boundary(tetra, face)
    }

    fn point_tags(&self, point: PointId) -> Result<PointTags, MeshMetricError> {
        (**self).point_tags(point)
    }

    fn ridge_normals(&self, point: PointId) -> Option<RidgeNormals> {
        (**self).ridge_normals(point)
    }
}
