//! Per-point metric storage.
//!
//! A `MetricField` is a flat array of metric slots indexed by `PointId`
//! (slot 0 is the unused sentinel). Each slot holds one scalar in isotropic
//! mode or the six entries of a `SymTensor3` in the anisotropic modes.

use std::ops::Range;

use crate::debug_invariants::DebugInvariants;
use crate::geometry::tensor::SymTensor3;
use crate::mesh_error::MeshMetricError;
use crate::topology::point::PointId;

/// Storage mode of a metric field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MetricMode {
    /// One scalar size per point.
    Isotropic,
    /// Tensor per point, after size-field finalization: ridge points store a
    /// directionally split metric that cannot be blended as-is.
    Anisotropic,
    /// Tensor per point, before size-field finalization: every slot is a
    /// plain tensor in the global frame.
    AnisotropicFullFrame,
}

impl MetricMode {
    /// Number of `f64` per slot.
    #[inline]
    pub fn stride(self) -> usize {
        match self {
            MetricMode::Isotropic => 1,
            MetricMode::Anisotropic | MetricMode::AnisotropicFullFrame => 6,
        }
    }

    #[inline]
    pub fn is_anisotropic(self) -> bool {
        !matches!(self, MetricMode::Isotropic)
    }
}

/// One metric slot value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MetricValue {
    Scalar(f64),
    Tensor(SymTensor3),
}

/// Flat per-point metric array.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricField {
    mode: MetricMode,
    data: Vec<f64>,
}

impl MetricField {
    /// Creates a zero-filled field able to hold points `1..=num_points`.
    pub fn new(mode: MetricMode, num_points: usize) -> Self {
        Self {
            mode,
            data: vec![0.0; (num_points + 1) * mode.stride()],
        }
    }

    #[inline]
    pub fn mode(&self) -> MetricMode {
        self.mode
    }

    /// Highest point id the field can address.
    #[inline]
    pub fn capacity(&self) -> usize {
        (self.data.len() / self.mode.stride()).saturating_sub(1)
    }

    /// Grows the field so that points `1..=num_points` are addressable.
    pub fn ensure_capacity(&mut self, num_points: usize) {
        let needed = (num_points + 1) * self.mode.stride();
        if needed > self.data.len() {
            self.data.resize(needed, 0.0);
        }
    }

    /// Marks the end of size-field finalization: full-frame tensors become
    /// the compressed anisotropic storage.
    pub fn finalize_size_field(&mut self) {
        if self.mode == MetricMode::AnisotropicFullFrame {
            self.mode = MetricMode::Anisotropic;
        }
        self.debug_assert_invariants();
    }

    /// Offsets of the slot of `point` in the flat storage.
    fn slot_range(&self, point: PointId) -> Result<Range<usize>, MeshMetricError> {
        let stride = self.mode.stride();
        point
            .index()
            .checked_mul(stride)
            .and_then(|start| Some(start..start.checked_add(stride)?))
            .filter(|range| range.end <= self.data.len())
            .ok_or(MeshMetricError::PointOutOfRange {
                point,
                capacity: self.capacity(),
            })
    }

    /// Raw slot of `point`.
    pub fn slot(&self, point: PointId) -> Result<&[f64], MeshMetricError> {
        let range = self.slot_range(point)?;
        Ok(&self.data[range])
    }

    fn slot_mut(&mut self, point: PointId) -> Result<&mut [f64], MeshMetricError> {
        let range = self.slot_range(point)?;
        Ok(&mut self.data[range])
    }

    /// Scalar metric of `point` (isotropic mode only).
    pub fn scalar(&self, point: PointId) -> Result<f64, MeshMetricError> {
        self.expect_isotropic()?;
        Ok(self.slot(point)?[0])
    }

    /// Tensor metric of `point` (anisotropic modes only).
    pub fn tensor(&self, point: PointId) -> Result<SymTensor3, MeshMetricError> {
        self.expect_anisotropic()?;
        let slot = self.slot(point)?;
        SymTensor3::from_slice(slot).ok_or(MeshMetricError::PointOutOfRange {
            point,
            capacity: self.capacity(),
        })
    }

    pub fn value(&self, point: PointId) -> Result<MetricValue, MeshMetricError> {
        match self.mode {
            MetricMode::Isotropic => self.scalar(point).map(MetricValue::Scalar),
            _ => self.tensor(point).map(MetricValue::Tensor),
        }
    }

    pub fn set_scalar(&mut self, point: PointId, value: f64) -> Result<(), MeshMetricError> {
        self.expect_isotropic()?;
        self.slot_mut(point)?[0] = value;
        Ok(())
    }

    pub fn set_tensor(&mut self, point: PointId, value: SymTensor3) -> Result<(), MeshMetricError> {
        self.expect_anisotropic()?;
        self.slot_mut(point)?.copy_from_slice(value.entries());
        Ok(())
    }

    pub fn set_value(&mut self, point: PointId, value: MetricValue) -> Result<(), MeshMetricError> {
        match value {
            MetricValue::Scalar(v) => self.set_scalar(point, v),
            MetricValue::Tensor(m) => self.set_tensor(point, m),
        }
    }

    /// All tensor slots, including the sentinel slot 0.
    pub fn tensors(&self) -> Option<&[SymTensor3]> {
        self.mode
            .is_anisotropic()
            .then(|| bytemuck::cast_slice(&self.data))
    }

    fn expect_isotropic(&self) -> Result<(), MeshMetricError> {
        if self.mode == MetricMode::Isotropic {
            Ok(())
        } else {
            Err(MeshMetricError::MetricModeMismatch {
                expected: MetricMode::Isotropic,
                found: self.mode,
            })
        }
    }

    fn expect_anisotropic(&self) -> Result<(), MeshMetricError> {
        if self.mode.is_anisotropic() {
            Ok(())
        } else {
            Err(MeshMetricError::MetricModeMismatch {
                expected: MetricMode::Anisotropic,
                found: self.mode,
            })
        }
    }
}

impl DebugInvariants for MetricField {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "MetricField");
    }

    fn validate_invariants(&self) -> Result<(), MeshMetricError> {
        if self.data.len() % self.mode.stride() != 0 {
            return Err(MeshMetricError::InvariantViolation(format!(
                "metric storage of {} values is not a multiple of the slot size {}",
                self.data.len(),
                self.mode.stride()
            )));
        }
        if let Some((i, v)) = self
            .data
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(MeshMetricError::InvariantViolation(format!(
                "non-finite metric value {v} at offset {i}"
            )));
        }
        Ok(())
    }
}
