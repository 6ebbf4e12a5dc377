use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::traits::{Capabilities, DefaultConstructible};
use crate::util::error::{AllocFailure, CapacityExceeded, StorageError};

const MAX_BYTES: usize = isize::MAX as usize;

/// Raw, typed storage management on top of the global allocator.
///
/// Allocation and construction are separate steps: [`allocate`](Allocator::allocate) hands out
/// memory for `n` values without creating any, the `construct` family creates values in that
/// memory, and the `destroy` family ends their lifetimes without releasing the memory. Callers are
/// responsible for pairing every constructed value with exactly one destroy and every allocation
/// with exactly one [`deallocate`](Allocator::deallocate) of the same size.
///
/// Zero-sized requests (either `n == 0` or a zero-sized `T`) never touch the global allocator and
/// are represented by a dangling pointer.
pub struct Allocator<T>(PhantomData<T>);

impl<T> Allocator<T> {
    /// Returns the largest number of elements that a single allocation can hold.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::memory::Allocator;
    /// assert_eq!(Allocator::<u32>::max_size(), isize::MAX as usize / 4);
    /// assert_eq!(Allocator::<()>::max_size(), isize::MAX as usize);
    /// ```
    pub const fn max_size() -> usize {
        if T::ZERO_SIZED {
            MAX_BYTES
        } else {
            MAX_BYTES / size_of::<T>()
        }
    }

    /// Creates the [`Layout`] of a block holding `n` elements.
    ///
    /// # Errors
    /// Returns [`CapacityExceeded`] if the block would be larger than [`isize::MAX`] bytes.
    pub fn layout(n: usize) -> Result<Layout, CapacityExceeded> {
        Layout::array::<T>(n).map_err(|_| CapacityExceeded {
            len: 0,
            additional: n,
            max: Self::max_size(),
        })
    }

    /// Allocates uninitialized storage for exactly `n` elements.
    ///
    /// # Errors
    /// Returns [`StorageError::CapacityExceeded`] if the layout can't be represented, or
    /// [`StorageError::AllocFailure`] if the global allocator returns null. In both cases nothing
    /// has been allocated.
    pub fn allocate(n: usize) -> Result<NonNull<T>, StorageError> {
        let layout = Self::layout(n)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(raw_ptr.cast()).ok_or(StorageError::AllocFailure(AllocFailure { layout }))
    }

    /// Releases storage obtained from [`allocate`](Allocator::allocate). Any values still living in
    /// the block are forgotten, not dropped.
    ///
    /// # Safety
    /// `ptr` must have been returned by `allocate(n)` with the same `n`, and must not be used
    /// afterwards.
    pub unsafe fn deallocate(ptr: NonNull<T>, n: usize) {
        // The layout was valid when allocated, so it still is.
        let Ok(layout) = Layout::array::<T>(n) else {
            return;
        };

        if layout.size() != 0 {
            // SAFETY: ptr was allocated in the global allocator with this layout, which has a
            // non-zero size.
            unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) }
        }
    }

    /// Moves `value` into the uninitialized slot at `ptr`.
    ///
    /// # Safety
    /// `ptr` must be valid for writes and properly aligned. Any value previously at `ptr` is
    /// overwritten without being dropped.
    pub unsafe fn construct(ptr: NonNull<T>, value: T) {
        // SAFETY: The caller guarantees that ptr is valid for writes.
        unsafe { ptr.write(value) }
    }

    /// Constructs a value directly in the slot at `ptr` from the result of `f`. If `f` panics,
    /// the slot is left uninitialized.
    ///
    /// # Safety
    /// See [`construct`](Allocator::construct).
    pub unsafe fn construct_with<F: FnOnce() -> T>(ptr: NonNull<T>, f: F) {
        // SAFETY: The caller guarantees that ptr is valid for writes.
        unsafe { ptr.write(f()) }
    }

    /// Constructs a value at `ptr` from the result of `f`, leaving the slot uninitialized and
    /// returning the error if `f` fails.
    ///
    /// # Safety
    /// See [`construct`](Allocator::construct).
    pub unsafe fn try_construct_with<E, F>(ptr: NonNull<T>, f: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = f()?;
        // SAFETY: The caller guarantees that ptr is valid for writes.
        unsafe { ptr.write(value) }
        Ok(())
    }

    /// Constructs the default value of `T` at `ptr`.
    ///
    /// # Safety
    /// See [`construct`](Allocator::construct).
    pub unsafe fn construct_default(ptr: NonNull<T>)
    where
        T: DefaultConstructible,
    {
        // SAFETY: The caller guarantees that ptr is valid for writes.
        unsafe { ptr.write(T::default()) }
    }

    /// Drops the value at `ptr` in place. Compiles to nothing for trivially destructible types.
    ///
    /// # Safety
    /// `ptr` must point to an initialized value, which is uninitialized afterwards.
    pub unsafe fn destroy(ptr: NonNull<T>) {
        if !T::TRIVIALLY_DESTRUCTIBLE {
            // SAFETY: The caller guarantees that ptr points to an initialized value.
            unsafe { ptr::drop_in_place(ptr.as_ptr()) }
        }
    }

    /// Drops `n` contiguous values starting at `first`. If one of the destructors panics, the
    /// remaining values are still dropped before the panic continues.
    ///
    /// # Safety
    /// `[first, first + n)` must hold initialized values, which are uninitialized afterwards.
    pub unsafe fn destroy_n(first: NonNull<T>, n: usize) {
        if !T::TRIVIALLY_DESTRUCTIBLE && n != 0 {
            // SAFETY: The caller guarantees that the range holds n initialized values. Dropping a
            // slice continues through the rest of it if an element's drop panics.
            unsafe { ptr::drop_in_place(NonNull::slice_from_raw_parts(first, n).as_ptr()) }
        }
    }

    /// Drops the values in `[first, last)`.
    ///
    /// Zero-sized types have no measurable pointer ranges, so nothing can be dropped for them. Use
    /// [`destroy_n`](Allocator::destroy_n) for zero-sized types with drop glue.
    ///
    /// # Safety
    /// `first` and `last` must belong to the same allocation with `first <= last`, and the range
    /// must hold initialized values.
    pub unsafe fn destroy_range(first: NonNull<T>, last: NonNull<T>) {
        if T::ZERO_SIZED {
            debug_assert!(
                T::TRIVIALLY_DESTRUCTIBLE,
                "destroy_range can't count zero-sized values with drop glue, use destroy_n"
            );
            return;
        }

        // SAFETY: The caller guarantees that both pointers are in the same allocation, in order.
        let n = unsafe { last.offset_from(first) } as usize;
        // SAFETY: The caller guarantees that the range is initialized.
        unsafe { Self::destroy_n(first, n) }
    }
}
