//! Packed reference → (parent, split role) lookup.
//!
//! The table spans every reference used by the declared materials,
//! `[offset, offset + len)`. Each slot packs `4 * (parent + 1) + role`:
//! the two low bits hold the [`SplitRole`] and the upper part the parent
//! reference shifted by one, so that 0 means "no parent" while reference 0
//! stays a legal label.

use std::fmt;

use itertools::{Itertools, MinMaxResult};

use crate::debug_invariants::DebugInvariants;
use crate::materials::descriptor::{MaterialDescriptor, MultiMaterialConfig, Reference};
use crate::mesh_error::MeshMetricError;

/// Split role stored in the low two bits of a table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SplitRole {
    /// Original region the level-set leaves untouched.
    NoSplit = 0,
    /// Original region cut by the level-set.
    Split = 1,
    /// Exterior (positive side) child.
    Plus = 2,
    /// Interior (negative side) child.
    Minus = 3,
}

static_assertions::const_assert!((SplitRole::Minus as u8) < 4);

impl SplitRole {
    #[inline]
    fn from_bits(bits: u64) -> SplitRole {
        match bits & 3 {
            0 => SplitRole::NoSplit,
            1 => SplitRole::Split,
            2 => SplitRole::Plus,
            _ => SplitRole::Minus,
        }
    }

    /// Whether this is one of the two child roles.
    #[inline]
    pub fn is_child(self) -> bool {
        matches!(self, SplitRole::Plus | SplitRole::Minus)
    }
}

/// Interior reference given to regions that no material declares.
pub const MINUS_DEFAULT: Reference = SplitRole::Minus as Reference;
/// Exterior reference given to regions that no material declares.
pub const PLUS_DEFAULT: Reference = SplitRole::Plus as Reference;

/// Decoded table slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableEntry {
    /// Parent reference, `None` for a root reference.
    pub parent: Option<Reference>,
    pub role: SplitRole,
}

/// Largest reference span a table may cover.
///
/// The lookup stores one `u64` per reference between the smallest and the
/// largest declared one, so this caps it at 128 MiB.
pub const MAX_TABLE_SPAN: usize = 1 << 24;

/// Classification table built from a multi-material configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialTable {
    offset: Reference,
    lookup: Vec<u64>,
}

impl MaterialTable {
    /// Validates `config` and builds its lookup.
    ///
    /// No table is returned unless every declared material was supplied and
    /// the references are free of conflicts.
    ///
    /// The lookup holds one slot per reference in `[min, max]` of the
    /// declared references, whether used or not. Spans wider than
    /// [`MAX_TABLE_SPAN`] fail with [`MeshMetricError::TableAllocation`].
    pub fn build(config: &MultiMaterialConfig) -> Result<Self, MeshMetricError> {
        config.validate()?;

        let (min, max) = match config
            .materials
            .iter()
            .flat_map(MaterialDescriptor::references)
            .minmax()
        {
            MinMaxResult::NoElements => {
                return Err(MeshMetricError::ConfigurationIncomplete {
                    supplied: 0,
                    declared: config.declared,
                });
            }
            MinMaxResult::OneElement(r) => (r, r),
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
        };

        let len = (i64::from(max) - i64::from(min) + 1) as usize;
        if len > MAX_TABLE_SPAN {
            return Err(MeshMetricError::TableAllocation(len));
        }
        let mut lookup = Vec::new();
        lookup
            .try_reserve_exact(len)
            .map_err(|_| MeshMetricError::TableAllocation(len))?;
        lookup.resize(len, 0);

        let mut table = MaterialTable {
            offset: min,
            lookup,
        };
        for material in &config.materials {
            table.set(material);
        }

        log::debug!(
            "material table built: {} materials, references [{}, {}]",
            config.materials.len(),
            table.offset,
            max
        );
        log::trace!("material table:\n{table}");
        table.debug_assert_invariants();
        Ok(table)
    }

    fn key(&self, reference: Reference) -> Option<usize> {
        let key = i64::from(reference) - i64::from(self.offset);
        usize::try_from(key).ok().filter(|&k| k < self.lookup.len())
    }

    #[inline]
    fn pack(parent: Reference, role: SplitRole) -> u64 {
        4 * (parent as u64 + 1) + role as u64
    }

    fn set(&mut self, material: &MaterialDescriptor) {
        let own = if material.splits() {
            SplitRole::Split
        } else {
            SplitRole::NoSplit
        };
        if let Some(k) = self.key(material.reference) {
            self.lookup[k] = own as u64;
        }

        // A child that reuses the parent reference overwrites the slot
        // written just above.
        if let Some(children) = material.children {
            if children.interior == material.reference || children.exterior == material.reference {
                log::warn!(
                    "material {}: child reuses the parent reference, its slot now holds the child",
                    material.reference
                );
            }
            if let Some(k) = self.key(children.interior) {
                self.lookup[k] = Self::pack(material.reference, SplitRole::Minus);
            }
            if let Some(k) = self.key(children.exterior) {
                self.lookup[k] = Self::pack(material.reference, SplitRole::Plus);
            }
        }
    }

    /// Smallest reference covered by the table.
    #[inline]
    pub fn offset(&self) -> Reference {
        self.offset
    }

    /// Number of references covered by the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Whether `reference` lies inside the table span.
    #[inline]
    pub fn contains(&self, reference: Reference) -> bool {
        self.key(reference).is_some()
    }

    /// Decoded slot of `reference`, `None` outside the table span.
    pub fn entry(&self, reference: Reference) -> Option<TableEntry> {
        let packed = self.lookup[self.key(reference)?];
        let parent = (packed / 4).checked_sub(1).map(|p| p as Reference);
        Some(TableEntry {
            parent,
            role: SplitRole::from_bits(packed),
        })
    }

    /// Parent reference of `reference`; `None` for a root reference or a
    /// reference outside the table.
    pub fn parent_of(&self, reference: Reference) -> Option<Reference> {
        self.entry(reference).and_then(|e| e.parent)
    }

    /// Split role of `reference`; `None` outside the table.
    pub fn role_of(&self, reference: Reference) -> Option<SplitRole> {
        self.entry(reference).map(|e| e.role)
    }

    /// Iterates `(reference, entry)` over the whole span.
    pub fn iter(&self) -> impl Iterator<Item = (Reference, TableEntry)> + '_ {
        (0..self.lookup.len()).filter_map(move |k| {
            let reference = self.offset + k as Reference;
            self.entry(reference).map(|e| (reference, e))
        })
    }
}

impl fmt::Display for MaterialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, (reference, entry)) in self.iter().enumerate() {
            let parent = entry.parent.unwrap_or(-1);
            writeln!(f, "{reference} ({k}): {parent} {:?}", entry.role)?;
        }
        Ok(())
    }
}

impl DebugInvariants for MaterialTable {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "MaterialTable");
    }

    fn validate_invariants(&self) -> Result<(), MeshMetricError> {
        for (reference, entry) in self.iter() {
            match (entry.parent, entry.role.is_child()) {
                (None, true) => {
                    return Err(MeshMetricError::InvariantViolation(format!(
                        "child reference {reference} has no parent"
                    )));
                }
                (Some(parent), _) if parent != reference => {
                    let parent_role = self.role_of(parent);
                    if parent_role != Some(SplitRole::Split) && !self.is_self_split(parent) {
                        return Err(MeshMetricError::InvariantViolation(format!(
                            "reference {reference} points to parent {parent} which does not split"
                        )));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl MaterialTable {
    /// A splitting parent whose own slot was overwritten by one of its children.
    fn is_self_split(&self, parent: Reference) -> bool {
        self.entry(parent)
            .is_some_and(|e| e.role.is_child() && e.parent == Some(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(materials: Vec<MaterialDescriptor>) -> MultiMaterialConfig {
        MultiMaterialConfig::from_materials(materials)
    }

    #[test]
    fn packed_slots() {
        let table = MaterialTable::build(&config(vec![
            MaterialDescriptor::split(1, 10, 11),
            MaterialDescriptor::keep(2),
        ]))
        .unwrap();
        assert_eq!(table.offset(), 1);
        assert_eq!(table.len(), 11);
        assert_eq!(table.lookup[10 - 1], 4 * 2 + 3);
        assert_eq!(table.lookup[11 - 1], 4 * 2 + 2);
        assert_eq!(table.lookup[0], 1);
        assert_eq!(table.lookup[1], 0);
        // Unused references inside the span are zero.
        assert_eq!(table.lookup[5], 0);
    }

    #[test]
    fn oversized_span_is_rejected() {
        let wide = config(vec![
            MaterialDescriptor::keep(0),
            MaterialDescriptor::keep(i32::MAX),
        ]);
        assert_eq!(
            MaterialTable::build(&wide),
            Err(MeshMetricError::TableAllocation(i32::MAX as usize + 1))
        );

        let just_over = config(vec![MaterialDescriptor::split(
            0,
            1,
            MAX_TABLE_SPAN as Reference,
        )]);
        assert_eq!(
            MaterialTable::build(&just_over),
            Err(MeshMetricError::TableAllocation(MAX_TABLE_SPAN + 1))
        );
    }

    #[test]
    fn zero_is_a_legal_parent() {
        let table = MaterialTable::build(&config(vec![MaterialDescriptor::split(0, 1, 2)])).unwrap();
        assert_eq!(table.parent_of(1), Some(0));
        assert_eq!(table.parent_of(0), None);
        assert_eq!(table.role_of(0), Some(SplitRole::Split));
        assert_eq!(table.role_of(1), Some(SplitRole::Minus));
        assert_eq!(table.role_of(2), Some(SplitRole::Plus));
    }

    #[test]
    fn outside_span_is_none() {
        let table = MaterialTable::build(&config(vec![MaterialDescriptor::split(5, 6, 7)])).unwrap();
        assert_eq!(table.role_of(4), None);
        assert_eq!(table.role_of(8), None);
        assert_eq!(table.parent_of(100), None);
        assert!(!table.contains(i32::MIN));
    }

    #[test]
    fn self_referencing_child_overwrites_parent_slot() {
        let table = MaterialTable::build(&config(vec![MaterialDescriptor::split(4, 4, 5)])).unwrap();
        assert_eq!(table.role_of(4), Some(SplitRole::Minus));
        assert_eq!(table.parent_of(4), Some(4));
        assert_eq!(table.role_of(5), Some(SplitRole::Plus));
        assert_eq!(table.parent_of(5), Some(4));
        assert!(table.validate_invariants().is_ok());
    }

    #[test]
    fn build_rejects_invalid_configuration() {
        let mut cfg = MultiMaterialConfig::with_declared(3);
        cfg.push(MaterialDescriptor::keep(1));
        assert_eq!(
            MaterialTable::build(&cfg),
            Err(MeshMetricError::ConfigurationIncomplete {
                supplied: 1,
                declared: 3
            })
        );
        assert!(MaterialTable::build(&MultiMaterialConfig::default()).is_err());
    }

    #[test]
    fn display_lists_every_reference() {
        let table = MaterialTable::build(&config(vec![MaterialDescriptor::split(1, 2, 3)])).unwrap();
        let dump = table.to_string();
        assert_eq!(dump.lines().count(), 3);
        assert!(dump.starts_with("1 (0): -1 Split"));
        assert!(dump.contains("2 (1): 1 Minus"));
    }
}
