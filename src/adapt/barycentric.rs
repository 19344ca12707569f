//! Metric at a point inside a tetrahedron, from barycentric weights.

use crate::adapt::interpolator::MetricInterpolator;
use crate::adapt::kernels::{MetricKernels, inverse_weighted_sum};
use crate::data::metric_field::{MetricField, MetricMode, MetricValue};
use crate::geometry::tensor::SymTensor3;
use crate::mesh_error::MeshMetricError;
use crate::topology::oracle::MeshTopology;
use crate::topology::point::PointId;

impl<M, K> MetricInterpolator<'_, M, K>
where
    M: MeshTopology + ?Sized,
    K: MetricKernels<M> + ?Sized,
{
    /// Interpolates the metric of `new_point`, located inside `tetra` with
    /// barycentric weights `cb`, and stores it.
    ///
    /// On failure the field is left untouched.
    pub fn interpolate_barycentric_metric(
        &self,
        metrics: &mut MetricField,
        tetra: PointId,
        new_point: PointId,
        cb: [f64; 4],
    ) -> Result<(), MeshMetricError> {
        let value = self.barycentric_metric(metrics, tetra, cb)?;
        metrics.set_value(new_point, value)
    }

    /// Computes, without storing it, the metric at barycentric weights `cb`
    /// of `tetra`.
    ///
    /// Scalars are summed with the weights. Tensors are summed in inverse
    /// space; after size-field finalization each vertex contributes its
    /// effective metric, before it its stored tensor.
    pub fn barycentric_metric(
        &self,
        metrics: &MetricField,
        tetra: PointId,
        cb: [f64; 4],
    ) -> Result<MetricValue, MeshMetricError> {
        self.options.check_weights(&cb)?;
        let vertices = self.mesh.tetra_vertices(tetra)?;

        let tensors = match metrics.mode() {
            MetricMode::Isotropic => {
                let mut value = 0.0;
                for (w, v) in cb.iter().zip(vertices) {
                    value += w * metrics.scalar(v)?;
                }
                return Ok(MetricValue::Scalar(value));
            }
            MetricMode::Anisotropic => {
                let mut tensors = [SymTensor3::ZERO; 4];
                for (m, v) in tensors.iter_mut().zip(vertices) {
                    *m = self.resolve_effective_metric(metrics, tetra, v)?;
                }
                tensors
            }
            MetricMode::AnisotropicFullFrame => {
                let mut tensors = [SymTensor3::ZERO; 4];
                for (m, v) in tensors.iter_mut().zip(vertices) {
                    *m = metrics.tensor(v)?;
                }
                tensors
            }
        };

        inverse_weighted_sum(&cb, &tensors, &self.options)
            .map(MetricValue::Tensor)
            .inspect_err(|e| {
                log::warn!("barycentric metric interpolation in tetra {tetra} failed: {e}");
            })
    }
}
