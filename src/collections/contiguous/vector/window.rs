use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use derive_more::IsVariant;

use crate::memory::Allocator;
use crate::util::error::StorageError;

/// Whether a Vector currently owns a block of memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Storage {
    /// No block is held and the capacity is 0. This is the state of a new Vector.
    Unallocated,
    /// A block with room for at least one element is held.
    Allocated,
}

/// An owned block of storage for `cap` elements, of which the first `len` are initialized.
///
/// Dropping a Window drops its live elements and then releases the block. Relocation between
/// windows moves the elements out bitwise and sets the source `len` to 0 before the source is
/// dropped, so that it frees its block without touching the moved values.
pub(crate) struct Window<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> Window<T> {
    /// Creates the window of an unallocated Vector.
    pub(crate) const fn empty() -> Window<T> {
        Window {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a window with room for exactly `cap` elements, none of them initialized.
    pub(crate) fn allocate(cap: usize) -> Result<Window<T>, StorageError> {
        Ok(Window {
            ptr: Allocator::allocate(cap)?,
            len: 0,
            cap,
            _phantom: PhantomData,
        })
    }

    pub(crate) const fn spare(&self) -> usize {
        self.cap - self.len
    }

    pub(crate) const fn storage(&self) -> Storage {
        if self.cap == 0 {
            Storage::Unallocated
        } else {
            Storage::Allocated
        }
    }

    /// Returns a pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be less than or equal to `cap`.
    pub(crate) const unsafe fn slot(&self, index: usize) -> NonNull<T> {
        // SAFETY: The caller guarantees that index is within the block or one past it.
        unsafe { self.ptr.add(index) }
    }

    pub(crate) const fn as_slice(&self) -> &[T] {
        // SAFETY: The first len elements are initialized and the pointer is aligned and non-null,
        // even for an empty window.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub(crate) const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: As for as_slice, with exclusive access guaranteed by &mut self.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Drop for Window<T> {
    fn drop(&mut self) {
        // Forget the elements first, so that a panicking destructor can't cause a double drop.
        let len = self.len;
        self.len = 0;

        // Frees the block even if dropping the elements unwinds.
        struct Release<T>(NonNull<T>, usize);

        impl<T> Drop for Release<T> {
            fn drop(&mut self) {
                // SAFETY: The block was allocated with exactly this capacity.
                unsafe { Allocator::deallocate(self.0, self.1) }
            }
        }

        let _release = Release(self.ptr, self.cap);
        // SAFETY: The first len elements are initialized and owned by this window.
        unsafe { Allocator::destroy_n(self.ptr, len) }
    }
}
