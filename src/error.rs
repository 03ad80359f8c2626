use crate::EntityId;
use thiserror::Error;

/// A malformed call to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// The same component type was supplied more than once in one call.
    #[error("component `{name}` is supplied more than once")]
    DuplicateComponent { name: &'static str },
    /// A store was configured with chunks that cannot hold any entity.
    #[error("chunk capacity must be at least 1")]
    ZeroChunkCapacity,
    /// A chunk of `capacity` entities does not fit the address space.
    #[error("chunk capacity {capacity} is too large")]
    ChunkTooLarge { capacity: usize },
}

/// Errors returned by [`EntityStore`](crate::EntityStore) and its views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("slot {slot} is out of range for a chunk of length {len}")]
    IndexOutOfRange { slot: usize, len: usize },
    #[error("entity {0} does not exist")]
    NoSuchEntity(EntityId),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
