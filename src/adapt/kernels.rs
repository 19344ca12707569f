//! Metric kernels: the surface-aware pieces of metric interpolation.
//!
//! Ridge and boundary-regularised interpolation depend on the surface
//! representation of the mesh and must be supplied by the driver. Ridge
//! averaging and the full-frame blend have volume-only defaults.

use crate::adapt::options::InterpolationOptions;
use crate::data::metric_field::MetricField;
use crate::geometry::tensor::SymTensor3;
use crate::mesh_error::MeshMetricError;
use crate::topology::oracle::MeshTopology;
use crate::topology::point::PointId;
use crate::topology::tags::RidgeNormals;
use crate::topology::tetra::BoundaryTriangle;

/// A new point created on a ridge edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RidgeRequest {
    pub tetra: PointId,
    /// Edge endpoints, `s` runs from `endpoints[0]` to `endpoints[1]`.
    pub endpoints: [PointId; 2],
    pub new_point: PointId,
    pub s: f64,
    /// Normals of the new ridge point.
    pub normals: RidgeNormals,
}

/// A new point created on a boundary (non-ridge) edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryRequest {
    /// Boundary triangle carrying the edge.
    pub triangle: BoundaryTriangle,
    /// Triangle edge index (`0..3`).
    pub local_edge: usize,
    pub new_point: PointId,
    /// Parameter along the triangle edge, oriented as
    /// [`BoundaryTriangle::edge_endpoints`].
    pub s: f64,
}

/// Collaborators used by [`MetricInterpolator`](crate::adapt::MetricInterpolator).
pub trait MetricKernels<M: MeshTopology + ?Sized> {
    /// Metric at a new ridge point, built in the frame of its two normals.
    fn ridge_metric(
        &self,
        mesh: &M,
        metrics: &MetricField,
        request: &RidgeRequest,
    ) -> Result<SymTensor3, MeshMetricError>;

    /// Metric at a new point of a boundary edge, regularised on the surface.
    fn boundary_metric(
        &self,
        mesh: &M,
        metrics: &MetricField,
        request: &BoundaryRequest,
    ) -> Result<SymTensor3, MeshMetricError>;

    /// Plain tensor standing in for the directionally split metric of the
    /// ridge vertex `_vertex` inside `tetra`.
    ///
    /// The default is the arithmetic mean of the stored tensors of the
    /// tetrahedron vertices whose metric is plain (singular, non-manifold or
    /// off-ridge).
    fn ridge_average(
        &self,
        mesh: &M,
        metrics: &MetricField,
        tetra: PointId,
        _vertex: PointId,
    ) -> Result<SymTensor3, MeshMetricError> {
        let mut sum = [0.0; 6];
        let mut count = 0usize;
        for v in mesh.tetra_vertices(tetra)? {
            if !mesh.point_tags(v)?.has_plain_metric() {
                continue;
            }
            for (acc, x) in sum.iter_mut().zip(metrics.tensor(v)?.entries()) {
                *acc += x;
            }
            count += 1;
        }
        if count == 0 {
            return Err(MeshMetricError::EmptyRidgeAverage(tetra));
        }
        let n = count as f64;
        Ok(SymTensor3::new(sum.map(|x| x / n)))
    }

    /// Blend of two full-frame tensors at parameter `s`.
    ///
    /// The default blends in inverse space, like internal edges.
    fn full_frame_blend(
        &self,
        a: &SymTensor3,
        b: &SymTensor3,
        s: f64,
        options: &InterpolationOptions,
    ) -> Result<SymTensor3, MeshMetricError> {
        inverse_blend(a, b, s, options)
    }
}

/// `((1 - s) a⁻¹ + s b⁻¹)⁻¹`.
pub fn inverse_blend(
    a: &SymTensor3,
    b: &SymTensor3,
    s: f64,
    options: &InterpolationOptions,
) -> Result<SymTensor3, MeshMetricError> {
    let ai = options.invert(a)?;
    let bi = options.invert(b)?;
    options.invert(&SymTensor3::blend(&ai, &bi, s))
}

/// `(Σ wᵢ mᵢ⁻¹)⁻¹`.
pub fn inverse_weighted_sum(
    weights: &[f64; 4],
    tensors: &[SymTensor3; 4],
    options: &InterpolationOptions,
) -> Result<SymTensor3, MeshMetricError> {
    let mut inverses = [SymTensor3::ZERO; 4];
    for (inv, m) in inverses.iter_mut().zip(tensors.iter()) {
        *inv = options.invert(m)?;
    }
    let sum = SymTensor3::weighted_sum(weights.iter().copied().zip(inverses.iter()));
    options.invert(&sum)
}
