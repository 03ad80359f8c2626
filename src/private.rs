pub use memoffset::offset_of;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
use crate::{Component, ComponentTypeId};
use std::alloc::Layout;

pub const MAX_INFOS_ON_STACK: usize = 16;

pub type ComponentInfos = SmallVec<[ComponentInfo; MAX_INFOS_ON_STACK]>;
pub type TypeIds = SmallVec<[ComponentTypeId; MAX_INFOS_ON_STACK]>;

/// Location of a single component inside an entity state value.
#[derive(Copy, Clone, Debug)]
pub struct ComponentInfo {
    pub type_id: ComponentTypeId,
    pub layout: Layout,
    /// Byte offset of the component from the start of the state.
    pub offset: usize,
}

impl ComponentInfo {
    pub fn of<C: Component>(offset: usize) -> Self {
        ComponentInfo {
            type_id: ComponentTypeId::of::<C>(),
            layout: Layout::new::<C>(),
            offset,
        }
    }
}
