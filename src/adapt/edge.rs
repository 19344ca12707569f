//! Metric at a point inserted along a tetrahedron edge.
//!
//! Isotropic fields blend the two endpoint scalars. Full-frame anisotropic
//! fields hand both endpoint tensors to the kernel's full-frame blend. Once
//! the size field is finalized, the edge role decides:
//!
//! - ridge edges go to the kernel's ridge interpolation, with the normals of
//!   the new point;
//! - boundary edges go to the kernel's surface interpolation on whichever
//!   adjacent face is tagged boundary. With no such face the split is
//!   deferred to a tetrahedron that carries the boundary;
//! - internal edges blend the effective endpoint tensors in inverse space.

use crate::adapt::interpolator::MetricInterpolator;
use crate::adapt::kernels::{BoundaryRequest, MetricKernels, RidgeRequest, inverse_blend};
use crate::data::metric_field::{MetricField, MetricMode, MetricValue};
use crate::geometry::tensor::{SymTensor3, blend};
use crate::mesh_error::MeshMetricError;
use crate::topology::oracle::MeshTopology;
use crate::topology::point::PointId;
use crate::topology::tags::EdgeRole;
use crate::topology::tetra::{edge_faces, edge_vertices, face_local_edge, tet_to_tri};

/// Value computed for a point on an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeMetric {
    Value(MetricValue),
    /// The edge is tagged boundary but this tetrahedron has no boundary face
    /// along it; resolve the point through another tetrahedron.
    Deferred,
}

/// What [`MetricInterpolator::interpolate_edge_metric`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The new point's slot was written.
    Interpolated,
    /// Nothing was written; see [`EdgeMetric::Deferred`].
    Deferred,
}

impl<M, K> MetricInterpolator<'_, M, K>
where
    M: MeshTopology + ?Sized,
    K: MetricKernels<M> + ?Sized,
{
    /// Interpolates the metric of `new_point`, inserted at parameter `s` on
    /// local edge `edge` of `tetra`, and stores it.
    ///
    /// On failure the field is left untouched.
    pub fn interpolate_edge_metric(
        &self,
        metrics: &mut MetricField,
        tetra: PointId,
        edge: usize,
        new_point: PointId,
        s: f64,
    ) -> Result<EdgeOutcome, MeshMetricError> {
        match self.edge_metric(metrics, tetra, edge, new_point, s)? {
            EdgeMetric::Value(value) => {
                metrics.set_value(new_point, value)?;
                Ok(EdgeOutcome::Interpolated)
            }
            EdgeMetric::Deferred => Ok(EdgeOutcome::Deferred),
        }
    }

    /// Computes, without storing it, the metric of `new_point` inserted at
    /// parameter `s` on local edge `edge` of `tetra`.
    pub fn edge_metric(
        &self,
        metrics: &MetricField,
        tetra: PointId,
        edge: usize,
        new_point: PointId,
        s: f64,
    ) -> Result<EdgeMetric, MeshMetricError> {
        self.options.check_parameter(s)?;
        let s = s.clamp(0.0, 1.0);
        let vertices = self.mesh.tetra_vertices(tetra)?;
        let [i0, i1] = edge_vertices(edge)?;
        let (p1, p2) = (vertices[i0], vertices[i1]);

        let result = match metrics.mode() {
            MetricMode::Isotropic => {
                let (m1, m2) = (metrics.scalar(p1)?, metrics.scalar(p2)?);
                return Ok(EdgeMetric::Value(MetricValue::Scalar(blend(m1, m2, s))));
            }
            MetricMode::AnisotropicFullFrame => {
                let (m1, m2) = (metrics.tensor(p1)?, metrics.tensor(p2)?);
                self.kernels
                    .full_frame_blend(&m1, &m2, s, &self.options)
                    .map(Some)
            }
            MetricMode::Anisotropic => match self.mesh.edge_role(tetra, edge)? {
                EdgeRole::Ridge => self.ridge_edge(metrics, tetra, [p1, p2], new_point, s).map(Some),
                EdgeRole::Boundary => self.boundary_edge(metrics, tetra, edge, [p1, p2], new_point, s),
                EdgeRole::Internal => self.internal_edge(metrics, tetra, [p1, p2], new_point, s).map(Some),
            },
        };

        match result {
            Ok(Some(m)) => Ok(EdgeMetric::Value(MetricValue::Tensor(m))),
            Ok(None) => Ok(EdgeMetric::Deferred),
            Err(e) => {
                log::warn!("metric interpolation on edge {edge} of tetra {tetra} failed: {e}");
                Err(e)
            }
        }
    }

    fn ridge_edge(
        &self,
        metrics: &MetricField,
        tetra: PointId,
        endpoints: [PointId; 2],
        new_point: PointId,
        s: f64,
    ) -> Result<SymTensor3, MeshMetricError> {
        let normals = self
            .mesh
            .ridge_normals(new_point)
            .ok_or(MeshMetricError::MissingRidgeNormals(new_point))?;
        let request = RidgeRequest {
            tetra,
            endpoints,
            new_point,
            s,
            normals,
        };
        self.kernels.ridge_metric(self.mesh, metrics, &request)
    }

    fn boundary_edge(
        &self,
        metrics: &MetricField,
        tetra: PointId,
        edge: usize,
        endpoints: [PointId; 2],
        new_point: PointId,
        s: f64,
    ) -> Result<Option<SymTensor3>, MeshMetricError> {
        let mut boundary_face = None;
        for face in edge_faces(edge)? {
            if self.mesh.face_is_boundary(tetra, face)? {
                boundary_face = Some(face);
                break;
            }
        }
        let Some(face) = boundary_face else {
            log::warn!(
                "boundary edge {edge} of tetra {tetra} has no boundary face, deferring point {new_point}"
            );
            return Ok(None);
        };

        let triangle = tet_to_tri(self.mesh, tetra, face)?;
        let local_edge = face_local_edge(face, edge).ok_or(MeshMetricError::InvalidLocalEdge(edge))?;
        // The triangle may run the edge the other way round.
        let s = if triangle.edge_endpoints(local_edge)? == endpoints {
            s
        } else {
            1.0 - s
        };
        let request = BoundaryRequest {
            triangle,
            local_edge,
            new_point,
            s,
        };
        self.kernels
            .boundary_metric(self.mesh, metrics, &request)
            .map(Some)
    }

    fn internal_edge(
        &self,
        metrics: &MetricField,
        tetra: PointId,
        [p1, p2]: [PointId; 2],
        new_point: PointId,
        s: f64,
    ) -> Result<SymTensor3, MeshMetricError> {
        let m1 = self.resolve_effective_metric(metrics, tetra, p1)?;
        let m2 = self.resolve_effective_metric(metrics, tetra, p2)?;
        let m = inverse_blend(&m1, &m2, s, &self.options)?;
        if m.m33().abs() < self.options.degeneracy_tolerance {
            log::warn!(
                "degenerate metric between {p1} ({:?}) and {p2} ({:?}): {:?}",
                m1.entries(),
                m2.entries(),
                m.entries()
            );
            return Err(MeshMetricError::DegenerateMetric {
                point: new_point,
                value: m.m33(),
            });
        }
        Ok(m)
    }
}
