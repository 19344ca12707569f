//! Read-only mesh topology consumed by the metric interpolation routines.
//!
//! This module provides:
//! - `PointId` handles for vertices and tetrahedra
//! - Point tags, edge roles and ridge normals
//! - Local tetrahedron edge/face numbering and the tetrahedron → boundary
//!   triangle mapping
//! - The `MeshTopology` oracle trait and the in-memory `TetMesh`

pub mod in_memory;
pub mod oracle;
pub mod point;
pub mod tags;
pub mod tetra;

pub use in_memory::TetMesh;
pub use oracle::MeshTopology;
pub use point::PointId;
pub use tags::{EdgeRole, PointTags, RidgeNormals};
pub use tetra::{BoundaryTriangle, tet_to_tri};
