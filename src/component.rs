use std::any::{self, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A plain data payload that can be attached to an entity.
///
/// Components are stored by bitwise copy inside chunks, so they must be `Copy`.
pub trait Component: Copy + Send + Sync + 'static {}

impl<T> Component for T where T: Copy + Send + Sync + 'static {}

/// A process-wide identifier of a component type.
///
/// Two identifiers are equal iff they describe the same Rust type.
#[derive(Copy, Clone)]
pub struct ComponentTypeId {
    id: TypeId,
    name: &'static str,
}

impl ComponentTypeId {
    /// Returns the identifier of the component `C`.
    pub fn of<C: Component>() -> Self {
        ComponentTypeId {
            id: TypeId::of::<C>(),
            name: any::type_name::<C>(),
        }
    }

    /// Returns the name of the component type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for ComponentTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentTypeId {}

impl Hash for ComponentTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for ComponentTypeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentTypeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
