use std::fmt;

/// An archetype identifier.
pub type ArchetypeId = u32;

/// An entity identifier.
///
/// The index part is recycled after removal, the generation part is not,
/// so an identifier never refers to two different entities.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EntityId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl EntityId {
    pub const NULL: Self = EntityId {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Constructs a new entity identifier.
    pub fn new(index: u32, generation: u32) -> EntityId {
        EntityId { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::NULL
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Where the components of a live entity are stored.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EntityLocation {
    pub archetype: ArchetypeId,
    /// Index of the chunk within the archetype.
    pub chunk: usize,
    /// Index of the slot within the chunk.
    pub slot: usize,
}
