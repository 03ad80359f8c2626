use crate::error::Result;
use crate::private::{ComponentInfo, ComponentInfos};
use crate::{Component, EntityId, EntityStore};
use std::mem::{self, MaybeUninit};

/// Collects the components of an entity whose component set is only known at runtime.
///
/// ```
/// use archetype_store::{EntityBuilder, EntityStore};
///
/// let mut store = EntityStore::new();
/// let entity = EntityBuilder::new()
///     .with(10u32)
///     .with([1.0f32; 3])
///     .spawn_in(&mut store)
///     .unwrap();
///
/// assert_eq!(store.get::<u32>(entity), Some(&10));
/// ```
#[derive(Default, Clone)]
pub struct EntityBuilder {
    /// Raw component storage. Each component is written
    /// unaligned into this vector.
    data: Vec<MaybeUninit<u8>>,
    infos: ComponentInfos,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<C: Component>(mut self, component: C) -> Self {
        self.add(component);
        self
    }

    /// Appends a component. Adding the same component type twice makes
    /// [`spawn_in`](Self::spawn_in) fail.
    pub fn add<C: Component>(&mut self, component: C) -> &mut Self {
        let offset = self.data.len();
        let size = mem::size_of::<C>();

        self.data.resize(offset + size, MaybeUninit::uninit());
        unsafe {
            self.data
                .as_mut_ptr()
                .add(offset)
                .cast::<C>()
                .write_unaligned(component);
        }

        self.infos.push(ComponentInfo::of::<C>(offset));
        self
    }

    /// Returns the number of components added so far.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.infos.clear();
    }

    /// Creates an entity with the collected components. The builder can be reused.
    pub fn spawn_in(&self, store: &mut EntityStore) -> Result<EntityId> {
        // Safety: every info points at a component written by `add`.
        unsafe { store.create_entity_raw(self.data.as_ptr() as *const u8, self.infos.clone()) }
    }
}
