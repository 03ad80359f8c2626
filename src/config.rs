use crate::error::InvalidArgument;
use crate::EntityId;
use std::mem;

/// Number of entity slots in every chunk of a store created with [`StoreConfig::default`].
pub const DEFAULT_CHUNK_CAPACITY: usize = 512;

/// Largest chunk capacity whose entity list can still be allocated.
pub const MAX_CHUNK_CAPACITY: usize = isize::MAX as usize / mem::size_of::<EntityId>();

/// Construction parameters of an [`EntityStore`](crate::EntityStore).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of entity slots in each chunk. Uniform across all archetypes of a store.
    pub chunk_capacity: usize,
}

impl StoreConfig {
    pub fn with_chunk_capacity(mut self, chunk_capacity: usize) -> Self {
        self.chunk_capacity = chunk_capacity;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), InvalidArgument> {
        if self.chunk_capacity == 0 {
            return Err(InvalidArgument::ZeroChunkCapacity);
        }
        if self.chunk_capacity > MAX_CHUNK_CAPACITY {
            return Err(InvalidArgument::ChunkTooLarge {
                capacity: self.chunk_capacity,
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
        }
    }
}
