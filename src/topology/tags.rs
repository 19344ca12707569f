//! Point tags and edge roles read from the mesh topology.
//!
//! Both are owned by the topology collaborator; the interpolation routines
//! only read them.

use bitflags::bitflags;

bitflags! {
    /// Geometric classification of a mesh vertex.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointTags: u16 {
        /// Lies on a ridge (two surface normals disagree).
        const RIDGE = 1 << 0;
        /// Sharp corner.
        const CORNER = 1 << 1;
        /// Required point (must not move); counts as singular.
        const REQUIRED = 1 << 2;
        /// Non-manifold point.
        const NON_MANIFOLD = 1 << 3;
        /// Lies on a domain boundary.
        const BOUNDARY = 1 << 4;
    }
}

impl PointTags {
    /// Singular points (corners or required points) carry one authoritative tensor.
    #[inline]
    pub fn is_singular(self) -> bool {
        self.intersects(PointTags::CORNER | PointTags::REQUIRED)
    }

    #[inline]
    pub fn is_non_manifold(self) -> bool {
        self.contains(PointTags::NON_MANIFOLD)
    }

    #[inline]
    pub fn is_ridge(self) -> bool {
        self.contains(PointTags::RIDGE)
    }

    /// Whether the stored metric of the point can be blended as-is.
    ///
    /// Singular and non-manifold points win over the ridge flag.
    #[inline]
    pub fn has_plain_metric(self) -> bool {
        self.is_singular() || self.is_non_manifold() || !self.is_ridge()
    }
}

/// Role of a local tetrahedron edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EdgeRole {
    /// Geometric ridge.
    Ridge,
    /// On a domain boundary but not a ridge.
    Boundary,
    /// Interior edge.
    #[default]
    Internal,
}

/// The two surface normals of a ridge point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RidgeNormals {
    pub n1: [f64; 3],
    pub n2: [f64; 3],
}
