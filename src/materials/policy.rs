//! Level-set split policy.
//!
//! Answers the questions the level-set discretization asks about region
//! references: does a region split and into which children, do two regions
//! sit on both sides of one interface, and which original region does a
//! child come from.
//!
//! Without a multi-material configuration every region splits into the
//! default pair ([`MINUS_DEFAULT`], [`PLUS_DEFAULT`]).

use crate::materials::descriptor::{MultiMaterialConfig, Reference, SplitChildren};
use crate::materials::table::{MINUS_DEFAULT, MaterialTable, PLUS_DEFAULT, SplitRole};
use crate::mesh_error::MeshMetricError;

/// Outcome of [`LevelSetPolicy::should_split`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDecision {
    /// The region is kept whole.
    Keep,
    /// The region splits into these children.
    Split(SplitChildren),
}

impl SplitDecision {
    #[inline]
    pub fn splits(&self) -> bool {
        matches!(self, SplitDecision::Split(_))
    }

    /// `(split, interior, exterior)`; the children are `None` when kept.
    pub fn as_tuple(&self) -> (bool, Option<Reference>, Option<Reference>) {
        match self {
            SplitDecision::Keep => (false, None, None),
            SplitDecision::Split(c) => (true, Some(c.interior), Some(c.exterior)),
        }
    }
}

/// Default children of an undeclared region.
pub const DEFAULT_CHILDREN: SplitChildren = SplitChildren {
    interior: MINUS_DEFAULT,
    exterior: PLUS_DEFAULT,
};

#[derive(Clone, Debug)]
struct MultiMaterial {
    config: MultiMaterialConfig,
    table: MaterialTable,
}

/// Split policy for one level-set discretization pass.
///
/// The classification table lives as long as the policy; drop the policy at
/// the end of the pass.
#[derive(Clone, Debug, Default)]
pub struct LevelSetPolicy {
    multi: Option<MultiMaterial>,
}

impl LevelSetPolicy {
    /// Single-material mode: every region splits with the default labels.
    pub fn single_material() -> Self {
        Self::default()
    }

    /// Builds the policy from a configuration.
    ///
    /// A configuration declaring no material yields single-material mode;
    /// otherwise the classification table is built and any configuration
    /// error is returned.
    pub fn from_config(config: MultiMaterialConfig) -> Result<Self, MeshMetricError> {
        if !config.is_active() {
            return Ok(Self::single_material());
        }
        let table = MaterialTable::build(&config)?;
        Ok(Self {
            multi: Some(MultiMaterial { config, table }),
        })
    }

    #[inline]
    pub fn is_multi_material(&self) -> bool {
        self.multi.is_some()
    }

    /// The classification table, in multi-material mode.
    pub fn table(&self) -> Option<&MaterialTable> {
        self.multi.as_ref().map(|m| &m.table)
    }

    /// Whether a region with reference `reference` must be split, and into
    /// which children.
    ///
    /// Declared materials answer for themselves; any other reference splits
    /// into [`DEFAULT_CHILDREN`].
    pub fn should_split(&self, reference: Reference) -> SplitDecision {
        let declared = self
            .multi
            .iter()
            .flat_map(|m| m.config.materials.iter())
            .find(|m| m.reference == reference);
        match declared {
            Some(m) => m.children.map_or(SplitDecision::Keep, SplitDecision::Split),
            None => SplitDecision::Split(DEFAULT_CHILDREN),
        }
    }

    /// Whether a region with reference `reference` is one the level-set must
    /// leave whole. Always `false` in single-material mode.
    pub fn is_unsplittable(&self, reference: Reference) -> bool {
        match &self.multi {
            None => false,
            Some(m) => m.table.role_of(reference) == Some(SplitRole::NoSplit),
        }
    }

    /// Whether `a` and `b` are the two children of one interface.
    pub fn straddles_level_set(&self, a: Reference, b: Reference) -> bool {
        match &self.multi {
            None => {
                (a == MINUS_DEFAULT && b == PLUS_DEFAULT) || (a == PLUS_DEFAULT && b == MINUS_DEFAULT)
            }
            Some(m) => matches!(
                (m.table.role_of(a), m.table.role_of(b)),
                (Some(SplitRole::Minus), Some(SplitRole::Plus))
                    | (Some(SplitRole::Plus), Some(SplitRole::Minus))
            ),
        }
    }

    /// Original reference of the region labelled `reference`.
    ///
    /// A child maps to its parent; a root reference, any reference in
    /// single-material mode, and references unknown to the table map to
    /// themselves.
    pub fn original_reference_of(&self, reference: Reference) -> Reference {
        self.multi
            .as_ref()
            .and_then(|m| m.table.parent_of(reference))
            .unwrap_or(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::descriptor::MaterialDescriptor;

    fn two_materials() -> LevelSetPolicy {
        LevelSetPolicy::from_config(MultiMaterialConfig::from_materials(vec![
            MaterialDescriptor::split(1, 10, 11),
            MaterialDescriptor::keep(2),
        ]))
        .unwrap()
    }

    #[test]
    fn single_material_defaults() {
        let policy = LevelSetPolicy::single_material();
        assert!(!policy.is_multi_material());
        assert_eq!(policy.should_split(7), SplitDecision::Split(DEFAULT_CHILDREN));
        assert!(!policy.is_unsplittable(7));
        assert_eq!(policy.original_reference_of(7), 7);
        assert!(policy.straddles_level_set(MINUS_DEFAULT, PLUS_DEFAULT));
        assert!(policy.straddles_level_set(PLUS_DEFAULT, MINUS_DEFAULT));
        assert!(!policy.straddles_level_set(MINUS_DEFAULT, MINUS_DEFAULT));
    }

    #[test]
    fn empty_configuration_is_single_material() {
        let policy = LevelSetPolicy::from_config(MultiMaterialConfig::default()).unwrap();
        assert!(!policy.is_multi_material());
        assert!(policy.table().is_none());
    }

    #[test]
    fn declared_materials() {
        let policy = two_materials();
        assert_eq!(policy.should_split(1).as_tuple(), (true, Some(10), Some(11)));
        assert_eq!(policy.should_split(2).as_tuple(), (false, None, None));
        assert!(policy.is_unsplittable(2));
        assert!(!policy.is_unsplittable(1));
        assert!(!policy.is_unsplittable(10));
        assert_eq!(policy.original_reference_of(11), 1);
        assert_eq!(policy.original_reference_of(2), 2);
    }

    #[test]
    fn straddle_needs_both_signs() {
        let policy = two_materials();
        assert!(policy.straddles_level_set(10, 11));
        assert!(!policy.straddles_level_set(10, 10));
        assert!(!policy.straddles_level_set(1, 2));
        assert!(!policy.straddles_level_set(10, 99));
    }
}
