use crate::archetype::chunk::{Chunk, ChunkLayout, Version};
use crate::archetype::column::{Column, ColumnMut};
use crate::archetype::signature::ensure_unique;
use crate::archetype::Archetype;
use crate::error::Result;
use crate::private::TypeIds;
use crate::{Component, ComponentTypeId, EntityId, EntityStore};
use smallvec::smallvec;
use std::marker::PhantomData;
use std::{slice, vec};

#[cold]
#[inline(never)]
fn missing_column(name: &str) -> ! {
    panic!("matched archetype has no column for `{name}`");
}

/// A tuple of distinct component types a query selects.
pub trait QueryTuple: 'static {
    /// Read views of the selected columns, in tuple order.
    type Columns<'a>;
    /// Write views of the selected columns, in tuple order.
    type ColumnsMut<'a>;

    /// Returns the component types in tuple order.
    fn type_ids() -> TypeIds;

    #[doc(hidden)]
    fn columns<'a>(layout: &'a ChunkLayout, chunk: &'a Chunk) -> Self::Columns<'a>;

    /// # Safety
    /// The component types of the tuple must be distinct and no other reference
    /// to the selected columns may exist for `'a`.
    #[doc(hidden)]
    unsafe fn columns_mut<'a>(layout: &'a ChunkLayout, chunk: &'a Chunk) -> Self::ColumnsMut<'a>;
}

macro_rules! impl_query_tuple {
    ($($ty:ident),+) => {
        impl<$($ty: Component),+> QueryTuple for ($($ty,)+) {
            type Columns<'a> = ($(Column<'a, $ty>,)+);
            type ColumnsMut<'a> = ($(ColumnMut<'a, $ty>,)+);

            fn type_ids() -> TypeIds {
                smallvec![$(ComponentTypeId::of::<$ty>()),+]
            }

            fn columns<'a>(layout: &'a ChunkLayout, chunk: &'a Chunk) -> Self::Columns<'a> {
                ($(
                    match chunk.column::<$ty>(layout) {
                        Some(column) => column,
                        None => missing_column(std::any::type_name::<$ty>()),
                    },
                )+)
            }

            unsafe fn columns_mut<'a>(layout: &'a ChunkLayout, chunk: &'a Chunk) -> Self::ColumnsMut<'a> {
                ($(
                    match chunk.column_mut_unchecked::<$ty>(layout) {
                        Some(column) => column,
                        None => missing_column(std::any::type_name::<$ty>()),
                    },
                )+)
            }
        }
    };
}

impl_query_tuple!(A);
impl_query_tuple!(A, B);
impl_query_tuple!(A, B, C);
impl_query_tuple!(A, B, C, D);
impl_query_tuple!(A, B, C, D, E);
impl_query_tuple!(A, B, C, D, E, F);
impl_query_tuple!(A, B, C, D, E, F, G);
impl_query_tuple!(A, B, C, D, E, F, G, H);

fn validated_type_ids<Q: QueryTuple>() -> Result<TypeIds> {
    let type_ids = Q::type_ids();
    let mut sorted = type_ids.clone();
    sorted.sort_unstable();
    ensure_unique(&sorted)?;
    Ok(type_ids)
}

/// Indices of the archetypes whose signature contains every type of `type_ids`.
fn matching_archetypes(archetypes: &[Archetype], type_ids: &[ComponentTypeId]) -> Vec<usize> {
    archetypes
        .iter()
        .enumerate()
        .filter(|(_, arch)| arch.signature().is_superset_of(type_ids))
        .map(|(i, _)| i)
        .collect()
}

/// A read view over every entity having the components of `Q`.
pub struct Query<'s, Q> {
    store: &'s EntityStore,
    type_ids: TypeIds,
    _ty: PhantomData<Q>,
}

impl<'s, Q: QueryTuple> Query<'s, Q> {
    pub(crate) fn new(store: &'s EntityStore) -> Result<Self> {
        Ok(Query {
            store,
            type_ids: validated_type_ids::<Q>()?,
            _ty: PhantomData,
        })
    }

    /// Starts a new pass over the non-empty chunks of all matching archetypes.
    ///
    /// Archetypes are visited in creation order, chunks in storage order.
    pub fn chunks(&self) -> Chunks<'_, Q> {
        let archetypes = self.store.archetypes();

        Chunks {
            archetypes,
            matched: matching_archetypes(archetypes, &self.type_ids).into_iter(),
            current: None,
            type_ids: &self.type_ids,
            _ty: PhantomData,
        }
    }

    /// Returns the number of entities the query matches.
    pub fn count(&self) -> usize {
        self.chunks().map(|chunk| chunk.len()).sum()
    }

    pub fn global_system_version(&self) -> Version {
        self.store.global_system_version()
    }
}

impl<'q, 's, Q: QueryTuple> IntoIterator for &'q Query<'s, Q> {
    type Item = QueryChunk<'q, Q>;
    type IntoIter = Chunks<'q, Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}

/// One pass of a [`Query`].
pub struct Chunks<'a, Q> {
    archetypes: &'a [Archetype],
    matched: vec::IntoIter<usize>,
    current: Option<(&'a ChunkLayout, slice::Iter<'a, Chunk>)>,
    type_ids: &'a [ComponentTypeId],
    _ty: PhantomData<Q>,
}

impl<'a, Q: QueryTuple> Iterator for Chunks<'a, Q> {
    type Item = QueryChunk<'a, Q>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((layout, chunks)) = &mut self.current {
                if let Some(chunk) = chunks.find(|chunk| !chunk.is_empty()) {
                    return Some(QueryChunk {
                        layout: *layout,
                        chunk,
                        type_ids: self.type_ids,
                        _ty: PhantomData,
                    });
                }
            }

            let next_arch_id = self.matched.next()?;
            let archetype = &self.archetypes[next_arch_id];
            self.current = Some((archetype.layout(), archetype.chunks().iter()));
        }
    }
}

/// Read access to the selected columns of one chunk.
pub struct QueryChunk<'a, Q> {
    layout: &'a ChunkLayout,
    chunk: &'a Chunk,
    type_ids: &'a [ComponentTypeId],
    _ty: PhantomData<Q>,
}

impl<'a, Q: QueryTuple> QueryChunk<'a, Q> {
    /// Returns the number of entities in the chunk.
    pub fn len(&self) -> usize {
        self.chunk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk.is_empty()
    }

    /// Returns the entities of the chunk in slot order.
    pub fn entities(&self) -> &'a [EntityId] {
        self.chunk.entities()
    }

    /// Returns the selected columns in the order of `Q`.
    pub fn columns(&self) -> Q::Columns<'a> {
        Q::columns(self.layout, self.chunk)
    }

    /// Returns the column of `C` if `C` is part of `Q`.
    pub fn column<C: Component>(&self) -> Option<Column<'a, C>> {
        if !self.type_ids.contains(&ComponentTypeId::of::<C>()) {
            return None;
        }
        self.chunk.column::<C>(self.layout)
    }
}

/// A write view over every entity having the components of `Q`.
pub struct QueryMut<'s, Q> {
    store: &'s mut EntityStore,
    type_ids: TypeIds,
    _ty: PhantomData<Q>,
}

impl<'s, Q: QueryTuple> QueryMut<'s, Q> {
    pub(crate) fn new(store: &'s mut EntityStore) -> Result<Self> {
        Ok(QueryMut {
            store,
            type_ids: validated_type_ids::<Q>()?,
            _ty: PhantomData,
        })
    }

    /// Starts a new read-only pass.
    pub fn chunks(&self) -> Chunks<'_, Q> {
        let archetypes = self.store.archetypes();

        Chunks {
            archetypes,
            matched: matching_archetypes(archetypes, &self.type_ids).into_iter(),
            current: None,
            type_ids: &self.type_ids,
            _ty: PhantomData,
        }
    }

    /// Starts a new pass with write access to the selected columns.
    pub fn chunks_mut(&mut self) -> ChunksMut<'_, Q> {
        ChunksMut {
            archetypes: self.store.archetypes_mut().iter_mut(),
            current: None,
            type_ids: &self.type_ids,
            _ty: PhantomData,
        }
    }

    pub fn count(&self) -> usize {
        self.chunks().map(|chunk| chunk.len()).sum()
    }

    pub fn global_system_version(&self) -> Version {
        self.store.global_system_version()
    }
}

/// One mutable pass of a [`QueryMut`].
pub struct ChunksMut<'a, Q> {
    archetypes: slice::IterMut<'a, Archetype>,
    current: Option<(&'a ChunkLayout, slice::IterMut<'a, Chunk>)>,
    type_ids: &'a [ComponentTypeId],
    _ty: PhantomData<Q>,
}

impl<'a, Q: QueryTuple> Iterator for ChunksMut<'a, Q> {
    type Item = QueryChunkMut<'a, Q>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((layout, chunks)) = &mut self.current {
                if let Some(chunk) = chunks.find(|chunk| !chunk.is_empty()) {
                    return Some(QueryChunkMut {
                        layout: *layout,
                        chunk,
                        type_ids: self.type_ids,
                        _ty: PhantomData,
                    });
                }
            }

            let type_ids = self.type_ids;
            let archetype = self
                .archetypes
                .find(|arch| arch.signature().is_superset_of(type_ids))?;
            let (layout, chunks) = archetype.layout_and_chunks_mut();
            self.current = Some((layout, chunks.iter_mut()));
        }
    }
}

/// Write access to the selected columns of one chunk.
pub struct QueryChunkMut<'a, Q> {
    layout: &'a ChunkLayout,
    chunk: &'a mut Chunk,
    type_ids: &'a [ComponentTypeId],
    _ty: PhantomData<Q>,
}

impl<'a, Q: QueryTuple> QueryChunkMut<'a, Q> {
    pub fn len(&self) -> usize {
        self.chunk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk.is_empty()
    }

    pub fn entities(&self) -> &[EntityId] {
        self.chunk.entities()
    }

    pub fn columns(&self) -> Q::Columns<'_> {
        Q::columns(self.layout, &*self.chunk)
    }

    /// Returns write views of the selected columns in the order of `Q`.
    pub fn columns_mut(&mut self) -> Q::ColumnsMut<'_> {
        // Safety: the types of `Q` were checked for uniqueness when the query was built,
        // and `self.chunk` is borrowed exclusively for the returned lifetime.
        unsafe { Q::columns_mut(self.layout, &*self.chunk) }
    }

    pub fn column<C: Component>(&self) -> Option<Column<'_, C>> {
        if !self.type_ids.contains(&ComponentTypeId::of::<C>()) {
            return None;
        }
        self.chunk.column::<C>(self.layout)
    }

    pub fn column_mut<C: Component>(&mut self) -> Option<ColumnMut<'_, C>> {
        if !self.type_ids.contains(&ComponentTypeId::of::<C>()) {
            return None;
        }
        self.chunk.column_mut::<C>(self.layout)
    }
}
