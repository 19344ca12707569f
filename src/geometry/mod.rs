//! Tensor algebra underlying every metric interpolation routine.

pub mod tensor;

pub use tensor::{SymTensor3, blend};
