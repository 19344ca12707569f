//! `PointId`: a strong, zero-cost handle for mesh entities
//!
//! Vertices and tetrahedra are both addressed by `PointId`. The id wraps a
//! nonzero `u64`; 0 is reserved as the invalid sentinel, which matches the
//! 1-based numbering of the mesh point and element arrays the interpolation
//! routines index into.

use std::{fmt, num::NonZeroU64};

use crate::mesh_error::MeshMetricError;

/// Opaque, nonzero handle of a mesh vertex or tetrahedron.
///
/// # Memory layout
/// `repr(transparent)` over `NonZeroU64`, so `Option<PointId>` is the same
/// size as a `u64`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct PointId(NonZeroU64);

impl PointId {
    /// Creates a new `PointId` from a raw `u64` value.
    ///
    /// # Errors
    /// Returns [`MeshMetricError::InvalidPointId`] if `raw == 0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use mesh_metric::topology::point::PointId;
    /// let p = PointId::new(1).unwrap();
    /// assert_eq!(p.get(), 1);
    /// assert!(PointId::new(0).is_err());
    /// ```
    #[inline]
    pub fn new(raw: u64) -> Result<Self, MeshMetricError> {
        NonZeroU64::new(raw)
            .map(PointId)
            .ok_or(MeshMetricError::InvalidPointId)
    }

    /// Returns the inner `u64` value of this `PointId`.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Slot of this point in a flat, 1-based per-point array.
    #[inline]
    pub fn index(self) -> usize {
        self.0.get() as usize
    }
}

/// Custom `Debug` implementation to display as `PointId(raw_value)`.
impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PointId").field(&self.get()).finish()
    }
}

/// Prints the numeric ID without any wrapper text.
impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
