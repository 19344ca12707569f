//! Metric interpolation at points created by mesh modifications.
//!
//! A [`MetricInterpolator`] borrows a read-only [`MeshTopology`] and a set of
//! [`MetricKernels`], and writes exactly one slot of a [`MetricField`] per
//! successful operation:
//!
//! - [`MetricInterpolator::interpolate_edge_metric`] for a point inserted on a
//!   tetrahedron edge;
//! - [`MetricInterpolator::interpolate_barycentric_metric`] for a point
//!   inserted inside a tetrahedron;
//! - [`MetricInterpolator::interpolate_edges`] and
//!   [`MetricInterpolator::interpolate_barycentric_batch`] for many points at
//!   once.
//!
//! [`MeshTopology`]: crate::topology::MeshTopology
//! [`MetricField`]: crate::data::MetricField

pub mod barycentric;
pub mod batch;
pub mod edge;
pub mod interpolator;
pub mod kernels;
pub mod options;

pub use batch::{BarycentricRequest, EdgeRequest, MaybeSync};
pub use edge::{EdgeMetric, EdgeOutcome};
pub use interpolator::MetricInterpolator;
pub use kernels::{BoundaryRequest, MetricKernels, RidgeRequest, inverse_blend, inverse_weighted_sum};
pub use options::InterpolationOptions;
