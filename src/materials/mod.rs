//! Multi-material classification for level-set discretization.
//!
//! - [`descriptor`]: the materials a user declares and their validation
//! - [`table`]: the packed reference → (parent, role) lookup built from them
//! - [`policy`]: the split questions asked while discretizing the level-set

pub mod descriptor;
pub mod policy;
pub mod table;

pub use descriptor::{MaterialDescriptor, MultiMaterialConfig, Reference, SplitChildren};
pub use policy::{DEFAULT_CHILDREN, LevelSetPolicy, SplitDecision};
pub use table::{
    MAX_TABLE_SPAN, MINUS_DEFAULT, MaterialTable, PLUS_DEFAULT, SplitRole, TableEntry,
};
