use crate::archetype::column::{Column, ColumnMut};
use crate::error::InvalidArgument;
use crate::private::{ComponentInfo, SmallVec, MAX_INFOS_ON_STACK};
use crate::{Component, ComponentTypeId, EntityId};
use std::alloc::{self, Layout};
use std::cell::Cell;
use std::ptr::{self, NonNull};
use std::slice;

/// A change-version stamp.
pub type Version = u32;

/// Placement of one component column inside a chunk block.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ColumnDesc {
    pub type_id: ComponentTypeId,
    pub item: Layout,
    pub offset: usize,
}

/// Memory layout shared by every chunk of an archetype.
///
/// Columns are sorted by component type and packed one after another,
/// each holding `capacity` items.
pub struct ChunkLayout {
    block: Layout,
    columns: SmallVec<[ColumnDesc; MAX_INFOS_ON_STACK]>,
    capacity: usize,
}

impl ChunkLayout {
    /// `infos` must be sorted by type id.
    ///
    /// Fails if the block for `capacity` entities does not fit the address space.
    pub fn new(infos: &[ComponentInfo], capacity: usize) -> Result<ChunkLayout, InvalidArgument> {
        let too_large = InvalidArgument::ChunkTooLarge { capacity };
        let mut size = 0usize;
        let mut align = 1usize;
        let mut columns = SmallVec::with_capacity(infos.len());

        for info in infos {
            let item = info.layout;
            let offset = size.checked_next_multiple_of(item.align()).ok_or(too_large)?;
            let column_size = item.size().checked_mul(capacity).ok_or(too_large)?;

            size = offset.checked_add(column_size).ok_or(too_large)?;
            align = align.max(item.align());

            columns.push(ColumnDesc {
                type_id: info.type_id,
                item,
                offset,
            });
        }

        // Zero-sized blocks cannot be allocated.
        let block = Layout::from_size_align(size.max(1), align).map_err(|_| too_large)?;

        Ok(ChunkLayout {
            block,
            columns,
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn column_index(&self, type_id: &ComponentTypeId) -> Option<usize> {
        self.columns
            .binary_search_by(|desc| desc.type_id.cmp(type_id))
            .ok()
    }
}

/// A fixed-capacity block holding the components of up to `capacity` entities.
///
/// Slot `i < len` holds a valid value in every column.
pub struct Chunk {
    block: NonNull<u8>,
    block_layout: Layout,
    capacity: usize,
    entities: Vec<EntityId>,
    change_versions: SmallVec<[Cell<Version>; MAX_INFOS_ON_STACK]>,
}

impl Chunk {
    pub(crate) fn new(layout: &ChunkLayout) -> Chunk {
        // Safety: block size is never zero.
        let raw = unsafe { alloc::alloc_zeroed(layout.block) };
        let block = match NonNull::new(raw) {
            Some(block) => block,
            None => alloc::handle_alloc_error(layout.block),
        };

        Chunk {
            block,
            block_layout: layout.block,
            capacity: layout.capacity,
            entities: Vec::with_capacity(layout.capacity),
            change_versions: layout.columns.iter().map(|_| Cell::new(0)).collect(),
        }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entities.len() == self.capacity
    }

    /// Returns the entities of the chunk in slot order.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    fn column_ptr(&self, desc: &ColumnDesc) -> *mut u8 {
        // Safety: column offsets lie inside the block.
        unsafe { self.block.as_ptr().add(desc.offset) }
    }

    /// Writes a new entity into the next free slot and returns the slot.
    ///
    /// # Safety
    /// * `layout` must be the layout this chunk was created with.
    /// * `infos` must be sorted by type id and match the layout columns one to one.
    /// * `src` must point to a state described by `infos`.
    pub(crate) unsafe fn push(
        &mut self,
        layout: &ChunkLayout,
        entity: EntityId,
        src: *const u8,
        infos: &[ComponentInfo],
    ) -> usize {
        debug_assert!(!self.is_full());
        debug_assert_eq!(layout.columns.len(), infos.len());

        let slot = self.entities.len();

        for (desc, info) in layout.columns.iter().zip(infos) {
            debug_assert_eq!(desc.type_id, info.type_id);
            let size = desc.item.size();
            let dst = self.column_ptr(desc).add(slot * size);
            ptr::copy_nonoverlapping(src.add(info.offset), dst, size);
        }

        self.entities.push(entity);
        slot
    }

    /// Copies every column value of `src_slot` in `src` into `dst_slot` of this chunk.
    /// Each column of this chunk keeps the newer of both change versions.
    ///
    /// # Safety
    /// Both chunks must belong to `layout` and both slots must be in range.
    pub(crate) unsafe fn copy_slot_from(
        &self,
        layout: &ChunkLayout,
        dst_slot: usize,
        src: &Chunk,
        src_slot: usize,
    ) {
        for (i, desc) in layout.columns.iter().enumerate() {
            let size = desc.item.size();
            let from = src.column_ptr(desc).add(src_slot * size);
            let to = self.column_ptr(desc).add(dst_slot * size);
            ptr::copy(from, to, size);

            let version = &self.change_versions[i];
            version.set(version.get().max(src.change_versions[i].get()));
        }
    }

    pub(crate) fn set_entity(&mut self, slot: usize, entity: EntityId) {
        self.entities[slot] = entity;
    }

    /// Drops the last slot. Column bytes stay in place and are overwritten by the next push.
    pub(crate) fn pop(&mut self) -> Option<EntityId> {
        self.entities.pop()
    }

    /// Returns a view of the column storing `C`, if the chunk has one.
    pub(crate) fn column<C: Component>(&self, layout: &ChunkLayout) -> Option<Column<'_, C>> {
        let index = layout.column_index(&ComponentTypeId::of::<C>())?;
        let desc = &layout.columns[index];

        // Safety: the column at `index` stores `len` initialized values of `C`.
        let data = unsafe { slice::from_raw_parts(self.column_ptr(desc) as *const C, self.len()) };
        Some(Column::new(data, &self.change_versions[index]))
    }

    /// Returns a mutable view of the column storing `C`, if the chunk has one.
    pub(crate) fn column_mut<C: Component>(
        &mut self,
        layout: &ChunkLayout,
    ) -> Option<ColumnMut<'_, C>> {
        // Safety: `self` is borrowed exclusively.
        unsafe { self.column_mut_unchecked(layout) }
    }

    /// # Safety
    /// No other reference to the column storing `C` may exist for the returned lifetime.
    pub(crate) unsafe fn column_mut_unchecked<C: Component>(
        &self,
        layout: &ChunkLayout,
    ) -> Option<ColumnMut<'_, C>> {
        let index = layout.column_index(&ComponentTypeId::of::<C>())?;
        let desc = &layout.columns[index];

        let data = slice::from_raw_parts_mut(self.column_ptr(desc) as *mut C, self.len());
        Some(ColumnMut::new(data, &self.change_versions[index]))
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        // Components are `Copy`, nothing to drop in place.
        unsafe { alloc::dealloc(self.block.as_ptr(), self.block_layout) };
    }
}

// Safety: the block is owned exclusively and holds `Send` components only.
unsafe impl Send for Chunk {}
