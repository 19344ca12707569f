//! User-declared materials for level-set discretization.

use hashbrown::HashMap;

use crate::mesh_error::MeshMetricError;

/// Region reference label.
pub type Reference = i32;

/// Child references of a material cut by the level-set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SplitChildren {
    /// Reference of the part inside the level-set (negative side).
    pub interior: Reference,
    /// Reference of the part outside the level-set (positive side).
    pub exterior: Reference,
}

/// One declared material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MaterialDescriptor {
    /// Original reference of the region.
    pub reference: Reference,
    /// `Some` when the region is split by the level-set.
    #[serde(default)]
    pub children: Option<SplitChildren>,
}

impl MaterialDescriptor {
    /// A region the level-set must not split.
    pub const fn keep(reference: Reference) -> Self {
        Self {
            reference,
            children: None,
        }
    }

    /// A region split into `interior` and `exterior`.
    pub const fn split(reference: Reference, interior: Reference, exterior: Reference) -> Self {
        Self {
            reference,
            children: Some(SplitChildren { interior, exterior }),
        }
    }

    #[inline]
    pub fn splits(&self) -> bool {
        self.children.is_some()
    }

    /// Every reference this material touches: original, then children.
    pub fn references(&self) -> impl Iterator<Item = Reference> + '_ {
        std::iter::once(self.reference).chain(
            self.children
                .iter()
                .flat_map(|c| [c.interior, c.exterior]),
        )
    }
}

/// Multi-material configuration: how many materials were declared and the
/// ones supplied so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MultiMaterialConfig {
    /// Number of materials announced by the user.
    pub declared: usize,
    /// Materials supplied, in declaration order.
    #[serde(default)]
    pub materials: Vec<MaterialDescriptor>,
}

impl MultiMaterialConfig {
    /// Announces `declared` materials; none supplied yet.
    pub fn with_declared(declared: usize) -> Self {
        Self {
            declared,
            materials: Vec::with_capacity(declared),
        }
    }

    /// Declares and supplies every material at once.
    pub fn from_materials(materials: Vec<MaterialDescriptor>) -> Self {
        Self {
            declared: materials.len(),
            materials,
        }
    }

    /// Supplies one more material.
    pub fn push(&mut self, material: MaterialDescriptor) {
        self.materials.push(material);
    }

    /// Whether multi-material mode is requested at all.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.declared > 0
    }

    /// Checks the configuration before a classification table is built.
    ///
    /// Rejects an incomplete set, negative references, a reference declared
    /// twice as an original, and any reference claimed by two different
    /// roles. A child equal to its own parent's reference is accepted.
    pub fn validate(&self) -> Result<(), MeshMetricError> {
        if self.materials.len() < self.declared {
            return Err(MeshMetricError::ConfigurationIncomplete {
                supplied: self.materials.len(),
                declared: self.declared,
            });
        }

        // reference -> (owning material, is it the original slot)
        let mut owners: HashMap<Reference, (Reference, bool)> = HashMap::new();
        for m in &self.materials {
            if let Some(r) = m.references().find(|r| *r < 0) {
                return Err(MeshMetricError::NegativeReference(r));
            }
            match owners.insert(m.reference, (m.reference, true)) {
                Some((_, true)) => return Err(MeshMetricError::DuplicateMaterial(m.reference)),
                Some((other, false)) => {
                    return Err(MeshMetricError::DuplicateReferenceConflict {
                        reference: m.reference,
                        first: other,
                        second: m.reference,
                    });
                }
                None => {}
            }
        }

        for m in &self.materials {
            let Some(children) = m.children else {
                continue;
            };
            if children.interior == children.exterior {
                return Err(MeshMetricError::DuplicateReferenceConflict {
                    reference: children.interior,
                    first: m.reference,
                    second: m.reference,
                });
            }
            for child in [children.interior, children.exterior] {
                if child == m.reference {
                    continue;
                }
                if let Some(&(other, _)) = owners.get(&child) {
                    return Err(MeshMetricError::DuplicateReferenceConflict {
                        reference: child,
                        first: other,
                        second: m.reference,
                    });
                }
                owners.insert(child, (m.reference, false));
            }
        }
        Ok(())
    }
}
