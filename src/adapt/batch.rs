//! Batched interpolation.
//!
//! A batch first computes every requested value against the field as it was
//! on entry, then writes the new slots. Requests are independent: each gets
//! its own result, and two requests naming the same new point both fail with
//! [`MeshMetricError::DuplicateTarget`]. With the `rayon` feature the compute
//! phase runs in parallel.

use hashbrown::HashMap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::adapt::edge::{EdgeMetric, EdgeOutcome};
use crate::adapt::interpolator::MetricInterpolator;
use crate::adapt::kernels::MetricKernels;
use crate::data::metric_field::{MetricField, MetricValue};
use crate::mesh_error::MeshMetricError;
use crate::topology::oracle::MeshTopology;
use crate::topology::point::PointId;

/// `Sync` when the `rayon` feature is enabled, no requirement otherwise.
#[cfg(feature = "rayon")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "rayon")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// `Sync` when the `rayon` feature is enabled, no requirement otherwise.
#[cfg(not(feature = "rayon"))]
pub trait MaybeSync {}
#[cfg(not(feature = "rayon"))]
impl<T: ?Sized> MaybeSync for T {}

/// Point inserted on a tetrahedron edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeRequest {
    pub tetra: PointId,
    pub edge: usize,
    pub new_point: PointId,
    pub s: f64,
}

/// Point inserted inside a tetrahedron.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarycentricRequest {
    pub tetra: PointId,
    pub new_point: PointId,
    pub weights: [f64; 4],
}

fn duplicate_targets(targets: impl Iterator<Item = PointId>) -> HashMap<PointId, usize> {
    let mut counts: HashMap<PointId, usize> = HashMap::new();
    for t in targets {
        *counts.entry(t).or_default() += 1;
    }
    counts.retain(|_, n| *n > 1);
    counts
}

#[cfg(feature = "rayon")]
fn compute_all<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
fn compute_all<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    F: Fn(&T) -> R,
{
    items.iter().map(f).collect()
}

impl<M, K> MetricInterpolator<'_, M, K>
where
    M: MeshTopology + MaybeSync + ?Sized,
    K: MetricKernels<M> + MaybeSync + ?Sized,
{
    /// Runs every edge request; see the module docs.
    pub fn interpolate_edges(
        &self,
        metrics: &mut MetricField,
        requests: &[EdgeRequest],
    ) -> Vec<Result<EdgeOutcome, MeshMetricError>> {
        let duplicates = duplicate_targets(requests.iter().map(|r| r.new_point));
        let field: &MetricField = metrics;
        let computed = compute_all(requests, |r| {
            if duplicates.contains_key(&r.new_point) {
                return Err(MeshMetricError::DuplicateTarget(r.new_point));
            }
            self.edge_metric(field, r.tetra, r.edge, r.new_point, r.s)
        });

        requests
            .iter()
            .zip(computed)
            .map(|(r, result)| match result? {
                EdgeMetric::Value(value) => {
                    metrics.set_value(r.new_point, value)?;
                    Ok(EdgeOutcome::Interpolated)
                }
                EdgeMetric::Deferred => Ok(EdgeOutcome::Deferred),
            })
            .collect()
    }

    /// Runs every barycentric request; see the module docs.
    pub fn interpolate_barycentric_batch(
        &self,
        metrics: &mut MetricField,
        requests: &[BarycentricRequest],
    ) -> Vec<Result<(), MeshMetricError>> {
        let duplicates = duplicate_targets(requests.iter().map(|r| r.new_point));
        let field: &MetricField = metrics;
        let computed: Vec<Result<MetricValue, MeshMetricError>> = compute_all(requests, |r| {
            if duplicates.contains_key(&r.new_point) {
                return Err(MeshMetricError::DuplicateTarget(r.new_point));
            }
            self.barycentric_metric(field, r.tetra, r.weights)
        });

        requests
            .iter()
            .zip(computed)
            .map(|(r, result)| metrics.set_value(r.new_point, result?))
            .collect()
    }
}
