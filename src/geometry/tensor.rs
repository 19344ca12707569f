//! Symmetric 3×3 tensors stored by their six independent entries.
//!
//! Entries are ordered `[m11, m12, m13, m22, m23, m33]`, the layout of a
//! per-point metric slot.

use bytemuck::{Pod, Zeroable};
use num_traits::Float;

use crate::mesh_error::MeshMetricError;

/// Off-diagonal magnitude below which a tensor is inverted as diagonal.
pub const INVERSION_EPS: f64 = 1e-6;
/// Determinant magnitude below which a tensor is considered singular.
pub const DETERMINANT_EPS: f64 = 1e-200;

/// Symmetric 3×3 tensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct SymTensor3(pub [f64; 6]);

static_assertions::assert_eq_size!(SymTensor3, [f64; 6]);

impl SymTensor3 {
    pub const ZERO: SymTensor3 = SymTensor3([0.0; 6]);
    pub const IDENTITY: SymTensor3 = SymTensor3([1.0, 0.0, 0.0, 1.0, 0.0, 1.0]);

    #[inline]
    pub const fn new(entries: [f64; 6]) -> Self {
        SymTensor3(entries)
    }

    /// Diagonal tensor `diag(a, b, c)`.
    #[inline]
    pub const fn diagonal(a: f64, b: f64, c: f64) -> Self {
        SymTensor3([a, 0.0, 0.0, b, 0.0, c])
    }

    /// Isotropic metric prescribing edge length `h` in every direction.
    #[inline]
    pub fn isotropic(h: f64) -> Self {
        let lambda = 1.0 / (h * h);
        Self::diagonal(lambda, lambda, lambda)
    }

    /// Reads a tensor from the first six values of `slice`.
    pub fn from_slice(slice: &[f64]) -> Option<Self> {
        let entries: [f64; 6] = slice.get(..6)?.try_into().ok()?;
        Some(SymTensor3(entries))
    }

    #[inline]
    pub fn entries(&self) -> &[f64; 6] {
        &self.0
    }

    /// Last diagonal entry.
    #[inline]
    pub fn m33(&self) -> f64 {
        self.0[5]
    }

    /// Full row-major 3×3 matrix.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        let m = &self.0;
        [[m[0], m[1], m[2]], [m[1], m[3], m[4]], [m[2], m[4], m[5]]]
    }

    /// First-row cofactors and the determinant expanded along them.
    fn first_row_cofactors(&self) -> ([f64; 3], f64) {
        let m = &self.0;
        let aa = m[3] * m[5] - m[4] * m[4];
        let bb = m[4] * m[2] - m[1] * m[5];
        let cc = m[1] * m[4] - m[2] * m[3];
        ([aa, bb, cc], m[0] * aa + m[1] * bb + m[2] * cc)
    }

    pub fn determinant(&self) -> f64 {
        self.first_row_cofactors().1
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Inverse with the default tolerances.
    pub fn invert(&self) -> Result<SymTensor3, MeshMetricError> {
        self.invert_with(INVERSION_EPS, DETERMINANT_EPS)
    }

    /// Inverse of the tensor.
    ///
    /// Nearly diagonal tensors (every off-diagonal magnitude below `diag_eps`)
    /// are inverted entrywise. Fails on an all-zero tensor, on
    /// `|det| < det_eps`, and whenever the result is not finite.
    pub fn invert_with(&self, diag_eps: f64, det_eps: f64) -> Result<SymTensor3, MeshMetricError> {
        let m = &self.0;
        let off = m[1].abs().max(m[2].abs()).max(m[4].abs());
        if off < diag_eps {
            if m[0] == 0.0 || m[3] == 0.0 || m[5] == 0.0 {
                return Err(MeshMetricError::SingularMetric(format!(
                    "zero diagonal entry in {m:?}"
                )));
            }
            let inv = SymTensor3::diagonal(1.0 / m[0], 1.0 / m[3], 1.0 / m[5]);
            return Self::finite_or_err(inv, m);
        }

        let vmax = m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if vmax == 0.0 {
            return Err(MeshMetricError::SingularMetric("null tensor".into()));
        }

        let ([aa, bb, cc], det) = self.first_row_cofactors();
        if det.abs() < det_eps {
            return Err(MeshMetricError::SingularMetric(format!(
                "determinant {det:e} of {m:?}"
            )));
        }
        let inv_det = 1.0 / det;
        let inv = SymTensor3([
            aa * inv_det,
            bb * inv_det,
            cc * inv_det,
            (m[0] * m[5] - m[2] * m[2]) * inv_det,
            (m[1] * m[2] - m[0] * m[4]) * inv_det,
            (m[0] * m[3] - m[1] * m[1]) * inv_det,
        ]);
        Self::finite_or_err(inv, m)
    }

    fn finite_or_err(inv: SymTensor3, m: &[f64; 6]) -> Result<SymTensor3, MeshMetricError> {
        if inv.is_finite() {
            Ok(inv)
        } else {
            Err(MeshMetricError::SingularMetric(format!(
                "non-finite inverse of {m:?}"
            )))
        }
    }

    /// `(1 - t) * a + t * b`, entrywise.
    pub fn blend(a: &SymTensor3, b: &SymTensor3, t: f64) -> SymTensor3 {
        let mut out = [0.0; 6];
        for (o, (x, y)) in out.iter_mut().zip(a.0.iter().zip(b.0.iter())) {
            *o = blend(*x, *y, t);
        }
        SymTensor3(out)
    }

    /// `Σ wᵢ · mᵢ`, entrywise.
    pub fn weighted_sum<'a, I>(terms: I) -> SymTensor3
    where
        I: IntoIterator<Item = (f64, &'a SymTensor3)>,
    {
        let mut out = [0.0; 6];
        for (w, m) in terms {
            for (o, v) in out.iter_mut().zip(m.0.iter()) {
                *o += w * v;
            }
        }
        SymTensor3(out)
    }

    /// Largest entrywise difference with `other`.
    pub fn max_abs_diff(&self, other: &SymTensor3) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()))
    }
}

/// `(1 - t) * a + t * b`.
#[inline]
pub fn blend<T: Float>(a: T, b: T, t: T) -> T {
    (T::one() - t) * a + t * b
}
