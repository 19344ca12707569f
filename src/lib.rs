#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-metric
//!
//! mesh-metric computes the sizing metric of points created while adapting a
//! tetrahedral mesh, and classifies material references for level-set
//! discretization.
//!
//! ## Features
//! - Symmetric 3×3 tensor algebra with tolerant inversion
//! - A flat per-point metric field in isotropic, anisotropic and full-frame
//!   anisotropic modes
//! - Edge and barycentric interpolation of scalar and tensor metrics, with
//!   ridge and boundary handling delegated to pluggable kernels
//! - Batched interpolation, parallel under the `rayon` feature
//! - A validated multi-material table answering the split questions of
//!   level-set discretization
//!
//! ## Usage
//!
//! ```
//! use mesh_metric::prelude::*;
//!
//! let mut config = MultiMaterialConfig::with_declared(2);
//! config.push(MaterialDescriptor::split(10, 11, 12));
//! config.push(MaterialDescriptor::keep(20));
//! let policy = LevelSetPolicy::from_config(config)?;
//!
//! assert!(policy.should_split(10).splits());
//! assert!(policy.straddles_level_set(11, 12));
//! assert_eq!(policy.original_reference_of(12), 10);
//! # Ok::<(), mesh_metric::mesh_error::MeshMetricError>(())
//! ```
//!
//! ## Invariant checking
//!
//! Debug builds, and release builds with the `strict-invariants` feature,
//! assert the internal invariants of a [`MetricField`](data::MetricField) at
//! size-field finalization and of a [`MaterialTable`](materials::MaterialTable)
//! once it is built.

pub mod adapt;
pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod materials;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::adapt::{
        BarycentricRequest, EdgeOutcome, EdgeRequest, InterpolationOptions, MetricInterpolator,
        MetricKernels,
    };
    pub use crate::data::{MetricField, MetricMode, MetricValue};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::SymTensor3;
    pub use crate::materials::{
        LevelSetPolicy, MaterialDescriptor, MaterialTable, MultiMaterialConfig, SplitDecision,
        SplitRole,
    };
    pub use crate::mesh_error::MeshMetricError;
    pub use crate::topology::{EdgeRole, MeshTopology, PointId, PointTags, RidgeNormals, TetMesh};
}
