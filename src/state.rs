use crate::private::{ComponentInfo, ComponentInfos};
use crate::Component;
use smallvec::smallvec;

/// A value holding the initial components of an entity.
///
/// Implemented for tuples of up to twelve components and derivable for structs
/// whose fields are components (`#[derive(EntityState)]`).
///
/// # Safety
/// Every info returned by `component_infos` must describe a field of `Self`:
/// `offset..offset + layout.size()` lies inside `Self` and holds an initialized value
/// of the type identified by `type_id`.
pub unsafe trait EntityState: 'static {
    fn component_infos() -> ComponentInfos;
}

macro_rules! impl_entity_state_tuple {
    ($($idx:tt $ty:ident),+) => {
        unsafe impl<$($ty: Component),+> EntityState for ($($ty,)+) {
            fn component_infos() -> ComponentInfos {
                smallvec![$(ComponentInfo::of::<$ty>(memoffset::offset_of_tuple!(Self, $idx))),+]
            }
        }
    };
}

impl_entity_state_tuple!(0 A);
impl_entity_state_tuple!(0 A, 1 B);
impl_entity_state_tuple!(0 A, 1 B, 2 C);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K);
impl_entity_state_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K, 11 L);
