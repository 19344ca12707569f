//! MeshMetricError: Unified error type for mesh-metric public APIs
//!
//! Every fallible operation in the crate reports through this enum. Failures
//! are always scoped to the single requested operation: an interpolation that
//! fails leaves the metric field untouched, and a classification table that
//! fails to build is never published.

use thiserror::Error;

use crate::data::metric_field::MetricMode;
use crate::topology::point::PointId;

/// Unified error type for mesh-metric operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshMetricError {
    /// Attempted to construct a PointId with a zero value (invalid).
    #[error("PointId must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidPointId,
    /// A point id does not address a slot of the metric field.
    #[error("point {point} is out of range of the metric field (capacity {capacity})")]
    PointOutOfRange { point: PointId, capacity: usize },
    /// The topology oracle does not know this vertex.
    #[error("unknown point {0}")]
    UnknownPoint(PointId),
    /// The topology oracle does not know this tetrahedron.
    #[error("unknown tetrahedron {0}")]
    UnknownTetra(PointId),
    /// A local edge index outside `0..6`.
    #[error("invalid local edge index {0} (expected 0..6)")]
    InvalidLocalEdge(usize),
    /// A local face index outside `0..4`.
    #[error("invalid local face index {0} (expected 0..4)")]
    InvalidLocalFace(usize),
    /// The metric field holds a different storage mode than the operation needs.
    #[error("metric mode mismatch: expected {expected:?}, found {found:?}")]
    MetricModeMismatch {
        expected: MetricMode,
        found: MetricMode,
    },
    /// Edge parameter outside `[0, 1]`.
    #[error("interpolation parameter {0} is outside [0, 1]")]
    InvalidInterpolationParameter(f64),
    /// Barycentric weights are negative, above one, or do not sum to one.
    #[error("invalid barycentric weights {0:?}")]
    InvalidBarycentricWeights([f64; 4]),
    /// A metric tensor could not be inverted.
    #[error("singular metric: {0}")]
    SingularMetric(String),
    /// The interpolated tensor is degenerate.
    #[error("degenerate interpolated metric at point {point}: m33 = {value:e}")]
    DegenerateMetric { point: PointId, value: f64 },
    /// A ridge edge was split but the new point carries no normal pair.
    #[error("ridge point {0} has no normal directions")]
    MissingRidgeNormals(PointId),
    /// No vertex of the tetrahedron offers a directly usable tensor.
    #[error("cannot average ridge metric in tetrahedron {0}: no usable vertex metric")]
    EmptyRidgeAverage(PointId),
    /// Two requests of a batch target the same new point.
    #[error("point {0} is targeted by more than one interpolation request")]
    DuplicateTarget(PointId),
    /// An external metric kernel reported a failure.
    #[error("metric kernel failure: {0}")]
    KernelFailure(String),
    /// A data structure failed its invariant check.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// Fewer materials were supplied than declared.
    #[error("only {supplied} materials out of {declared} have been set")]
    ConfigurationIncomplete { supplied: usize, declared: usize },
    /// Two materials declare the same original reference.
    #[error("material reference {0} is declared more than once")]
    DuplicateMaterial(i32),
    /// Two distinct materials (or both children of one material) claim the
    /// same reference.
    #[error("reference {reference} is claimed by materials {first} and {second}")]
    DuplicateReferenceConflict {
        reference: i32,
        first: i32,
        second: i32,
    },
    /// References are non-negative labels.
    #[error("material reference {0} is negative")]
    NegativeReference(i32),
    /// The classification lookup could not be allocated.
    #[error("cannot allocate material lookup table of {0} entries")]
    TableAllocation(usize),
}
