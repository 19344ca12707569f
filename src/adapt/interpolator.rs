//! The metric interpolator and the effective metric of a vertex.

use crate::adapt::kernels::MetricKernels;
use crate::adapt::options::InterpolationOptions;
use crate::data::metric_field::MetricField;
use crate::geometry::tensor::SymTensor3;
use crate::mesh_error::MeshMetricError;
use crate::topology::oracle::MeshTopology;
use crate::topology::point::PointId;

/// Computes metrics at new points from a read-only mesh and its kernels.
///
/// The interpolator never changes the mesh; the only write an operation
/// performs is the slot of the new point, and only once the value is known.
pub struct MetricInterpolator<'a, M: ?Sized, K: ?Sized> {
    pub(crate) mesh: &'a M,
    pub(crate) kernels: &'a K,
    pub(crate) options: InterpolationOptions,
}

impl<M: ?Sized, K: ?Sized> Clone for MetricInterpolator<'_, M, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized, K: ?Sized> Copy for MetricInterpolator<'_, M, K> {}

impl<'a, M, K> MetricInterpolator<'a, M, K>
where
    M: MeshTopology + ?Sized,
    K: MetricKernels<M> + ?Sized,
{
    /// Interpolator with default options.
    pub fn new(mesh: &'a M, kernels: &'a K) -> Self {
        Self {
            mesh,
            kernels,
            options: InterpolationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InterpolationOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> &InterpolationOptions {
        &self.options
    }

    #[inline]
    pub fn mesh(&self) -> &'a M {
        self.mesh
    }

    /// Tensor to blend for `vertex` when interpolating inside `tetra`.
    ///
    /// Singular and non-manifold vertices use their stored tensor, ridge
    /// vertices the kernel's ridge average, every other vertex its stored
    /// tensor.
    pub fn resolve_effective_metric(
        &self,
        metrics: &MetricField,
        tetra: PointId,
        vertex: PointId,
    ) -> Result<SymTensor3, MeshMetricError> {
        let tags = self.mesh.point_tags(vertex)?;
        if tags.has_plain_metric() {
            metrics.tensor(vertex)
        } else {
            self.kernels.ridge_average(self.mesh, metrics, tetra, vertex)
        }
    }
}
