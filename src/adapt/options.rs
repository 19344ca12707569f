//! Numerical tolerances of the metric interpolation routines.

use crate::geometry::tensor::{DETERMINANT_EPS, INVERSION_EPS, SymTensor3};
use crate::mesh_error::MeshMetricError;

/// Options controlling metric interpolation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InterpolationOptions {
    /// Off-diagonal magnitude below which tensors are inverted as diagonal.
    pub inversion_epsilon: f64,
    /// Determinant magnitude below which a tensor is singular.
    pub determinant_epsilon: f64,
    /// Smallest accepted `|m33|` of a tensor interpolated along an internal edge.
    pub degeneracy_tolerance: f64,
    /// Slack allowed on `s ∈ [0, 1]` and on barycentric weights.
    pub weight_tolerance: f64,
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            inversion_epsilon: INVERSION_EPS,
            determinant_epsilon: DETERMINANT_EPS,
            degeneracy_tolerance: 1e-6,
            weight_tolerance: 1e-8,
        }
    }
}

impl InterpolationOptions {
    /// Inverts `m` with these tolerances.
    #[inline]
    pub fn invert(&self, m: &SymTensor3) -> Result<SymTensor3, MeshMetricError> {
        m.invert_with(self.inversion_epsilon, self.determinant_epsilon)
    }

    /// Checks an edge parameter.
    pub fn check_parameter(&self, s: f64) -> Result<(), MeshMetricError> {
        let tol = self.weight_tolerance;
        if s.is_finite() && s >= -tol && s <= 1.0 + tol {
            Ok(())
        } else {
            Err(MeshMetricError::InvalidInterpolationParameter(s))
        }
    }

    /// Checks barycentric weights: each in `[0, 1]`, summing to one.
    pub fn check_weights(&self, cb: &[f64; 4]) -> Result<(), MeshMetricError> {
        let tol = self.weight_tolerance;
        let in_range = cb
            .iter()
            .all(|w| w.is_finite() && *w >= -tol && *w <= 1.0 + tol);
        let sum: f64 = cb.iter().sum();
        if in_range && (sum - 1.0).abs() <= tol.max(4.0 * f64::EPSILON) {
            Ok(())
        } else {
            Err(MeshMetricError::InvalidBarycentricWeights(*cb))
        }
    }
}
