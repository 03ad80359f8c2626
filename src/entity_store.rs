pub mod builder;

use crate::archetype::chunk::Version;
use crate::archetype::signature::ArchetypeSignature;
use crate::archetype::Archetype;
use crate::config::StoreConfig;
use crate::entity::{ArchetypeId, EntityLocation};
use crate::error::Result;
use crate::private::{ComponentInfo, ComponentInfos};
use crate::query::{Query, QueryMut, QueryTuple};
use crate::{Component, EntityId, EntityState, HashMap, StoreError};
use index_pool::IndexPool;
use std::collections::hash_map;

#[derive(Default)]
struct EntitySlot {
    generation: u32,
    location: Option<EntityLocation>,
}

/// A container of entities grouped into archetypes by their component types.
pub struct EntityStore {
    config: StoreConfig,
    archetypes: Vec<Archetype>,
    archetypes_by_signature: HashMap<ArchetypeSignature, usize>,
    slots: Vec<EntitySlot>,
    id_pool: IndexPool,
    len: usize,
    global_system_version: Version,
}

impl EntityStore {
    /// Creates an empty `EntityStore` with the default configuration.
    pub fn new() -> EntityStore {
        Self::build(StoreConfig::default())
    }

    /// Creates an empty `EntityStore` with the specified configuration.
    pub fn with_config(config: StoreConfig) -> Result<EntityStore> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: StoreConfig) -> EntityStore {
        EntityStore {
            config,
            archetypes: Vec::new(),
            archetypes_by_signature: Default::default(),
            slots: Vec::new(),
            id_pool: IndexPool::new(),
            len: 0,
            global_system_version: 0,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the number of entity slots per chunk.
    pub fn chunk_capacity(&self) -> usize {
        self.config.chunk_capacity
    }

    /// Returns the version callers stamp onto chunks they modify.
    pub fn global_system_version(&self) -> Version {
        self.global_system_version
    }

    /// Sets the version callers stamp onto chunks they modify.
    /// The store never advances it by itself.
    pub fn set_global_system_version(&mut self, version: Version) {
        self.global_system_version = version;
    }

    fn get_or_create_archetype(
        &mut self,
        signature: ArchetypeSignature,
        infos: &[ComponentInfo],
    ) -> Result<usize> {
        match self.archetypes_by_signature.entry(signature) {
            hash_map::Entry::Vacant(e) => {
                let arch_id = self.archetypes.len();
                let archetype = Archetype::new(e.key().clone(), infos, self.config.chunk_capacity)?;

                log::debug!("created archetype #{} {:?}", arch_id, archetype.signature());
                self.archetypes.push(archetype);

                e.insert(arch_id);
                Ok(arch_id)
            }
            hash_map::Entry::Occupied(e) => Ok(*e.get()),
        }
    }

    /// Creates a new entity with the components of `state` and returns its identifier.
    ///
    /// Fails without modifying the store if a component type occurs more than once
    /// or a chunk of this component set would not fit the address space.
    pub fn create_entity<S: EntityState>(&mut self, state: S) -> Result<EntityId> {
        // Safety: `S::component_infos` describes the fields of `state`.
        unsafe { self.create_entity_raw(&state as *const S as *const u8, S::component_infos()) }
    }

    /// # Safety
    /// `src` must point to a value described by `infos`.
    pub(crate) unsafe fn create_entity_raw(
        &mut self,
        src: *const u8,
        mut infos: ComponentInfos,
    ) -> Result<EntityId> {
        infos.sort_unstable_by_key(|info| info.type_id);
        let signature = ArchetypeSignature::new(infos.iter().map(|info| info.type_id).collect())?;

        let arch_id = self.get_or_create_archetype(signature, &infos)?;
        let entity = self.allocate_id();

        let archetype = &mut self.archetypes[arch_id];
        let (chunk, slot) = archetype.append_entity(entity, src, &infos);

        self.slots[entity.index as usize].location = Some(EntityLocation {
            archetype: arch_id as ArchetypeId,
            chunk,
            slot,
        });
        self.len += 1;

        log::trace!("created entity {} at archetype #{}, chunk {}, slot {}", entity, arch_id, chunk, slot);
        Ok(entity)
    }

    fn allocate_id(&mut self) -> EntityId {
        let index = self.id_pool.new_id();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, EntitySlot::default);
        }
        EntityId::new(index as u32, self.slots[index].generation)
    }

    /// Removes an entity from the store.
    ///
    /// The last entity of the same archetype takes over the freed slot.
    /// Change versions are left untouched.
    pub fn remove_entity(&mut self, entity: EntityId) -> Result<()> {
        let location = self.location(entity).ok_or(StoreError::NoSuchEntity(entity))?;
        let archetype = &mut self.archetypes[location.archetype as usize];

        if let Some(moved) = archetype.remove_entity(location.chunk, location.slot) {
            self.slots[moved.entity.index as usize].location = Some(EntityLocation {
                archetype: location.archetype,
                chunk: moved.chunk,
                slot: moved.slot,
            });
        }

        let slot = &mut self.slots[entity.index as usize];
        slot.location = None;
        slot.generation = slot.generation.wrapping_add(1);

        let returned = self.id_pool.return_id(entity.index as usize);
        debug_assert!(returned.is_ok());
        self.len -= 1;

        log::trace!("removed entity {}", entity);
        Ok(())
    }

    /// Returns the location of a live entity.
    pub fn location(&self, entity: EntityId) -> Option<EntityLocation> {
        let slot = self.slots.get(entity.index as usize)?;
        if slot.generation != entity.generation {
            return None;
        }
        slot.location
    }

    /// Returns `true` if the store contains the specified entity.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.location(entity).is_some()
    }

    /// Returns a reference to the component `C` of the specified entity.
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<&C> {
        let location = self.location(entity)?;
        self.archetypes[location.archetype as usize].get(location.chunk, location.slot)
    }

    /// Returns a mutable reference to the component `C` of the specified entity.
    ///
    /// The change version of the chunk is not modified.
    pub fn get_mut<C: Component>(&mut self, entity: EntityId) -> Option<&mut C> {
        let location = self.location(entity)?;
        self.archetypes[location.archetype as usize].get_mut(location.chunk, location.slot)
    }

    /// Creates a query over all entities having the components of `Q`.
    ///
    /// The query borrows the store, so create a new one after
    /// [`set_global_system_version`](Self::set_global_system_version) or after adding
    /// and removing entities.
    ///
    /// Fails if a component type occurs more than once in `Q`.
    pub fn query<Q: QueryTuple>(&self) -> Result<Query<'_, Q>> {
        Query::new(self)
    }

    /// Creates a query with write access to the components of `Q`.
    pub fn query_mut<Q: QueryTuple>(&mut self) -> Result<QueryMut<'_, Q>> {
        QueryMut::new(self)
    }

    /// Returns all archetypes in creation order.
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    pub(crate) fn archetypes_mut(&mut self) -> &mut [Archetype] {
        &mut self.archetypes
    }

    /// Returns the number of archetypes in the store.
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    /// Returns the number of entities in the store.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
