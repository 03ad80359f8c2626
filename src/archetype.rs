pub mod chunk;
pub mod column;
pub mod signature;

use crate::error::InvalidArgument;
use crate::private::ComponentInfo;
use crate::{Component, EntityId};
use chunk::{Chunk, ChunkLayout};
use signature::ArchetypeSignature;

/// An entity that was moved to another slot to fill a hole left by a removal.
pub(crate) struct MovedEntity {
    pub entity: EntityId,
    pub chunk: usize,
    pub slot: usize,
}

/// The storage of all entities sharing one exact set of component types.
///
/// Entities are packed into chunks in creation order; every chunk except the
/// last one is full.
pub struct Archetype {
    signature: ArchetypeSignature,
    layout: ChunkLayout,
    chunks: Vec<Chunk>,
    len: usize,
}

impl Archetype {
    /// `infos` must be sorted by type id and match `signature`.
    pub(crate) fn new(
        signature: ArchetypeSignature,
        infos: &[ComponentInfo],
        chunk_capacity: usize,
    ) -> Result<Archetype, InvalidArgument> {
        Ok(Archetype {
            layout: ChunkLayout::new(infos, chunk_capacity)?,
            signature,
            chunks: Vec::new(),
            len: 0,
        })
    }

    pub fn signature(&self) -> &ArchetypeSignature {
        &self.signature
    }

    /// Returns the number of entities in the archetype.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk_capacity(&self) -> usize {
        self.layout.capacity()
    }

    pub(crate) fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    pub(crate) fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub(crate) fn layout_and_chunks_mut(&mut self) -> (&ChunkLayout, &mut [Chunk]) {
        (&self.layout, &mut self.chunks)
    }

    /// Stores a new entity in the last chunk, allocating a chunk if that one is full.
    /// Returns the chunk index and slot of the entity.
    ///
    /// # Safety
    /// `infos` must be sorted by type id and match the signature of the archetype;
    /// `src` must point to a state described by `infos`.
    pub(crate) unsafe fn append_entity(
        &mut self,
        entity: EntityId,
        src: *const u8,
        infos: &[ComponentInfo],
    ) -> (usize, usize) {
        if self.chunks.last().map_or(true, Chunk::is_full) {
            self.chunks.push(Chunk::new(&self.layout));
            log::debug!(
                "allocated chunk #{} for archetype {:?} (capacity {})",
                self.chunks.len() - 1,
                self.signature,
                self.layout.capacity()
            );
        }

        let chunk_index = self.chunks.len() - 1;
        let slot = self.chunks[chunk_index].push(&self.layout, entity, src, infos);
        self.len += 1;

        (chunk_index, slot)
    }

    /// Removes the entity at `(chunk_index, slot)` by moving the last entity of the
    /// archetype into its place. Returns the moved entity, if any.
    ///
    /// The chunk receiving the moved entity keeps the newer change version of each column.
    pub(crate) fn remove_entity(&mut self, chunk_index: usize, slot: usize) -> Option<MovedEntity> {
        debug_assert!(chunk_index < self.chunks.len());
        debug_assert!(slot < self.chunks[chunk_index].len());

        let last_index = self.chunks.len() - 1;
        let last_slot = self.chunks[last_index].len() - 1;

        let moved = if (chunk_index, slot) != (last_index, last_slot) {
            let last_chunk = &self.chunks[last_index];
            let entity = last_chunk.entities()[last_slot];

            // Safety: both chunks belong to `self.layout` and both slots are occupied.
            unsafe {
                self.chunks[chunk_index].copy_slot_from(&self.layout, slot, last_chunk, last_slot)
            };
            self.chunks[chunk_index].set_entity(slot, entity);

            Some(MovedEntity {
                entity,
                chunk: chunk_index,
                slot,
            })
        } else {
            None
        };

        self.chunks[last_index].pop();
        if self.chunks[last_index].is_empty() {
            self.chunks.pop();
            log::debug!(
                "released chunk #{} of archetype {:?}",
                last_index,
                self.signature
            );
        }
        self.len -= 1;

        moved
    }

    /// Returns a reference to the component `C` at the specified location.
    pub(crate) fn get<C: Component>(&self, chunk_index: usize, slot: usize) -> Option<&C> {
        let chunk = self.chunks.get(chunk_index)?;
        chunk.column::<C>(&self.layout)?.as_slice().get(slot)
    }

    /// Returns a mutable reference to the component `C` at the specified location.
    pub(crate) fn get_mut<C: Component>(&mut self, chunk_index: usize, slot: usize) -> Option<&mut C> {
        let chunk = self.chunks.get_mut(chunk_index)?;
        let column = chunk.column_mut::<C>(&self.layout)?;
        column.into_mut_slice().get_mut(slot)
    }
}
