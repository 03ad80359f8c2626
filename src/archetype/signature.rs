use crate::error::InvalidArgument;
use crate::private::TypeIds;
use crate::ComponentTypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The exact set of component types stored by an archetype.
#[derive(Clone, Eq)]
pub struct ArchetypeSignature {
    sorted_type_ids: TypeIds,
    hash_val: u64,
}

impl ArchetypeSignature {
    /// Builds a signature from component types in any order.
    pub(crate) fn new(mut type_ids: TypeIds) -> Result<ArchetypeSignature, InvalidArgument> {
        type_ids.sort_unstable();
        ensure_unique(&type_ids)?;

        let mut hasher = ahash::AHasher::default();
        type_ids.hash(&mut hasher);
        let hash_val = hasher.finish();

        Ok(ArchetypeSignature {
            sorted_type_ids: type_ids,
            hash_val,
        })
    }

    /// Returns the component types, sorted.
    pub fn type_ids(&self) -> &[ComponentTypeId] {
        &self.sorted_type_ids
    }

    pub fn len(&self) -> usize {
        self.sorted_type_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_type_ids.is_empty()
    }

    pub fn contains(&self, type_id: &ComponentTypeId) -> bool {
        self.sorted_type_ids.binary_search(type_id).is_ok()
    }

    /// Returns `true` if every type of `type_ids` is part of the signature.
    pub fn is_superset_of(&self, type_ids: &[ComponentTypeId]) -> bool {
        type_ids.iter().all(|ty| self.contains(ty))
    }
}

/// Fails if a component type occurs twice in `sorted`.
pub(crate) fn ensure_unique(sorted: &[ComponentTypeId]) -> Result<(), InvalidArgument> {
    match sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        Some(pair) => Err(InvalidArgument::DuplicateComponent {
            name: pair[0].name(),
        }),
        None => Ok(()),
    }
}

impl PartialEq for ArchetypeSignature {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_type_ids == other.sorted_type_ids
    }
}

impl Hash for ArchetypeSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_val.hash(state);
    }
}

impl fmt::Debug for ArchetypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.sorted_type_ids.iter()).finish()
    }
}
