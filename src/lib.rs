//! An archetype-based container for entity component data.
//!
//! Entities with the same set of component types share an archetype.
//! An archetype stores its components in fixed-capacity chunks, one packed
//! array per component type, and every chunk keeps a change version per
//! component type. Systems stamp the chunks they modify with the store's
//! global system version and later skip chunks whose version did not move.
//!
//! # Examples
//!
//! ```
//! use archetype_store::EntityStore;
//!
//! #[derive(Copy, Clone, Debug, PartialEq)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//!     z: f32,
//! }
//!
//! #[derive(Copy, Clone, Default)]
//! struct Rotation {
//!     angle: f32,
//! }
//!
//! fn main() -> Result<(), archetype_store::StoreError> {
//!     let mut store = EntityStore::new();
//!
//!     store.create_entity((Position { x: 1.0, y: 0.0, z: 0.0 },))?;
//!     store.create_entity((Position { x: 2.0, y: 0.0, z: 0.0 }, Rotation::default()))?;
//!
//!     store.set_global_system_version(1);
//!
//!     let query = store.query::<(Position,)>()?;
//!     for chunk in &query {
//!         let (positions,) = chunk.columns();
//!         if positions[0].x == 1.0 {
//!             positions.set_change_version(query.global_system_version());
//!         }
//!     }
//!
//!     let versions: Vec<_> = query
//!         .chunks()
//!         .map(|chunk| chunk.columns().0.change_version())
//!         .collect();
//!     assert_eq!(versions, [1, 0]);
//!     Ok(())
//! }
//! ```


mod archetype;
mod component;
mod config;
mod entity;
mod entity_store;
mod error;
mod query;
mod state;

#[doc(hidden)]
pub mod private;

pub use archetype::chunk::Version;
pub use archetype::column::{Column, ColumnMut};
pub use archetype::signature::ArchetypeSignature;
pub use archetype::Archetype;
pub use component::{Component, ComponentTypeId};
pub use config::{StoreConfig, DEFAULT_CHUNK_CAPACITY, MAX_CHUNK_CAPACITY};
pub use entity::{ArchetypeId, EntityId, EntityLocation};
pub use entity_store::builder::EntityBuilder;
pub use entity_store::EntityStore;
pub use error::{InvalidArgument, Result, StoreError};
pub use macros::EntityState;
pub use query::{Chunks, ChunksMut, Query, QueryChunk, QueryChunkMut, QueryMut, QueryTuple};
pub use state::EntityState;

pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

/// Creates an entity from a list of components.
///
/// # Examples
/// ```
/// use archetype_store::{create_entity, EntityStore};
///
/// let mut store = EntityStore::new();
/// let entity = create_entity!(store, 1u8, 2u16).unwrap();
/// assert_eq!(store.get::<u16>(entity), Some(&2));
/// ```
#[macro_export]
macro_rules! create_entity {
    ($store: expr, $($component: expr),+ $(,)?) => {
        $store.create_entity(($($component,)+))
    };
}
