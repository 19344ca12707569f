#![allow(dead_code)]
use mesh_metric::{
    adapt::{BoundaryRequest, MetricKernels, RidgeRequest},
    data::{MetricField, MetricMode},
    geometry::SymTensor3,
    mesh_error::MeshMetricError,
    topology::{PointId, PointTags, RidgeNormals, TetMesh},
};

pub fn pid(u: u64) -> PointId {
    PointId::new(u).unwrap()
}

/// Offset added to `s` in the first entry of every ridge kernel result.
pub const RIDGE_MARK: f64 = 100.0;
/// Offset added to `s` in the first entry of every boundary kernel result.
pub const BOUNDARY_MARK: f64 = 200.0;

/// Kernels returning recognisable diagonal tensors:
/// ridge `diag(RIDGE_MARK + s, n1.z, 1)`,
/// boundary `diag(BOUNDARY_MARK + s, local_edge + 1, face + 1)`.
pub struct MarkerKernels;

impl MetricKernels<TetMesh> for MarkerKernels {
    fn ridge_metric(
        &self,
        _mesh: &TetMesh,
        _metrics: &MetricField,
        request: &RidgeRequest,
    ) -> Result<SymTensor3, MeshMetricError> {
        Ok(SymTensor3::diagonal(
            RIDGE_MARK + request.s,
            request.normals.n1[2],
            1.0,
        ))
    }

    fn boundary_metric(
        &self,
        _mesh: &TetMesh,
        _metrics: &MetricField,
        request: &BoundaryRequest,
    ) -> Result<SymTensor3, MeshMetricError> {
        Ok(SymTensor3::diagonal(
            BOUNDARY_MARK + request.s,
            request.local_edge as f64 + 1.0,
            request.triangle.face as f64 + 1.0,
        ))
    }
}

/// Kernels whose surface routines always fail.
pub struct FailingKernels;

impl MetricKernels<TetMesh> for FailingKernels {
    fn ridge_metric(
        &self,
        _mesh: &TetMesh,
        _metrics: &MetricField,
        _request: &RidgeRequest,
    ) -> Result<SymTensor3, MeshMetricError> {
        Err(MeshMetricError::KernelFailure("ridge".into()))
    }

    fn boundary_metric(
        &self,
        _mesh: &TetMesh,
        _metrics: &MetricField,
        _request: &BoundaryRequest,
    ) -> Result<SymTensor3, MeshMetricError> {
        Err(MeshMetricError::KernelFailure("boundary".into()))
    }
}

pub fn z_normals() -> RidgeNormals {
    RidgeNormals {
        n1: [0.0, 0.0, 1.0],
        n2: [1.0, 0.0, 0.0],
    }
}

/// One tetrahedron whose vertices carry `tags`; ridge-tagged vertices get
/// [`z_normals`]. Returns the mesh, the tetrahedron and its vertices.
pub fn single_tetra(tags: [PointTags; 4]) -> (TetMesh, PointId, [PointId; 4]) {
    let mut mesh = TetMesh::new();
    let vertices = tags.map(|t| {
        if t.contains(PointTags::RIDGE) {
            mesh.add_ridge_vertex(t, z_normals())
        } else {
            mesh.add_vertex(t)
        }
    });
    let tetra = mesh.add_tetra(vertices).unwrap();
    (mesh, tetra, vertices)
}

pub fn plain_tetra() -> (TetMesh, PointId, [PointId; 4]) {
    single_tetra([PointTags::empty(); 4])
}

/// Field of `mode` sized for the mesh plus `extra` new points.
pub fn field_for(mesh: &TetMesh, mode: MetricMode, extra: usize) -> MetricField {
    MetricField::new(mode, mesh.num_vertices() + extra)
}

pub fn assert_tensor_close(got: &SymTensor3, want: &SymTensor3, tol: f64) {
    assert!(
        got.max_abs_diff(want) <= tol,
        "tensors differ\n got={:?}\nwant={:?}",
        got.entries(),
        want.entries()
    );
}
