use crate::archetype::chunk::Version;
use crate::error::{Result, StoreError};
use crate::Component;
use std::cell::Cell;
use std::ops::{Index, IndexMut};
use std::slice;

/// Read access to the values of one component type inside a chunk,
/// together with the chunk's change version for that type.
pub struct Column<'a, C> {
    data: &'a [C],
    change_version: &'a Cell<Version>,
}

impl<'a, C> Clone for Column<'a, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C> Copy for Column<'a, C> {}

impl<'a, C: Component> Column<'a, C> {
    pub(crate) fn new(data: &'a [C], change_version: &'a Cell<Version>) -> Self {
        Column {
            data,
            change_version,
        }
    }

    /// Returns the number of values, equal to the chunk length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value at `slot`.
    pub fn get(&self, slot: usize) -> Result<&'a C> {
        self.data.get(slot).ok_or(StoreError::IndexOutOfRange {
            slot,
            len: self.data.len(),
        })
    }

    pub fn as_slice(&self) -> &'a [C] {
        self.data
    }

    pub fn iter(&self) -> slice::Iter<'a, C> {
        self.data.iter()
    }

    /// Returns the version last written by [`set_change_version`](Self::set_change_version),
    /// `0` if the column was never stamped.
    pub fn change_version(&self) -> Version {
        self.change_version.get()
    }

    /// Overwrites the change version. No ordering against the previous value is enforced.
    pub fn set_change_version(&self, version: Version) {
        self.change_version.set(version);
    }

    /// Returns `true` if the column was stamped with a version newer than `version`.
    pub fn changed_since(&self, version: Version) -> bool {
        self.change_version.get() > version
    }
}

impl<'a, C: Component> Index<usize> for Column<'a, C> {
    type Output = C;

    fn index(&self, slot: usize) -> &C {
        &self.data[slot]
    }
}

impl<'a, C: Component> IntoIterator for Column<'a, C> {
    type Item = &'a C;
    type IntoIter = slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Write access to the values of one component type inside a chunk.
///
/// Writing values does not stamp the chunk; call
/// [`set_change_version`](Self::set_change_version) to mark it changed.
pub struct ColumnMut<'a, C> {
    data: &'a mut [C],
    change_version: &'a Cell<Version>,
}

impl<'a, C: Component> ColumnMut<'a, C> {
    pub(crate) fn new(data: &'a mut [C], change_version: &'a Cell<Version>) -> Self {
        ColumnMut {
            data,
            change_version,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, slot: usize) -> Result<&C> {
        let len = self.data.len();
        self.data
            .get(slot)
            .ok_or(StoreError::IndexOutOfRange { slot, len })
    }

    pub fn get_mut(&mut self, slot: usize) -> Result<&mut C> {
        let len = self.data.len();
        self.data
            .get_mut(slot)
            .ok_or(StoreError::IndexOutOfRange { slot, len })
    }

    pub fn as_slice(&self) -> &[C] {
        &*self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut *self.data
    }

    pub fn into_mut_slice(self) -> &'a mut [C] {
        self.data
    }

    pub fn iter(&self) -> slice::Iter<'_, C> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, C> {
        self.data.iter_mut()
    }

    pub fn change_version(&self) -> Version {
        self.change_version.get()
    }

    pub fn set_change_version(&self, version: Version) {
        self.change_version.set(version);
    }

    pub fn changed_since(&self, version: Version) -> bool {
        self.change_version.get() > version
    }
}

impl<'a, C: Component> Index<usize> for ColumnMut<'a, C> {
    type Output = C;

    fn index(&self, slot: usize) -> &C {
        &self.data[slot]
    }
}

impl<'a, C: Component> IndexMut<usize> for ColumnMut<'a, C> {
    fn index_mut(&mut self, slot: usize) -> &mut C {
        &mut self.data[slot]
    }
}

impl<'a, C: Component> IntoIterator for ColumnMut<'a, C> {
    type Item = &'a mut C;
    type IntoIter = slice::IterMut<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}
