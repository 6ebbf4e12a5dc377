use std::any;
use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::convert::Infallible;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Bound, Deref, DerefMut, RangeBounds};
use std::ptr::NonNull;

use log::{debug, trace};

use super::plan::{MIN_CAP, plan};
use super::window::{Storage, Window};
use crate::cursor::{self, Cursor, Reverse, SliceCursor, Walk};
use crate::memory::{Allocator, uninit};
use crate::traits::{CopyConstructible, DefaultConstructible, TriviallyCopyable};
use crate::util::error::{CapacityExceeded, ConstructError, IndexOutOfBounds, StorageError};
use crate::util::result::{ResultExtension, StorageResultExtension};

/// A variable size contiguous collection, managing its own raw storage.
///
/// A Vector starts out [`Unallocated`](Storage::Unallocated) and allocates when it first needs room.
/// Growth follows [`plan`](super::plan): at least [`MIN_CAP`] elements for the first block and at
/// least half-again after that. A new block is always filled completely before the old one is
/// released, so every growing operation either succeeds or leaves the Vector exactly as it was,
/// including its capacity. This also holds when an element constructor panics.
///
/// Each operation that can run out of memory has a panicking form, which behaves like the standard
/// collections on allocation failure, and a `try_` form returning the cause as an error.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being added or removed.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `insert_n` | `O(n-i+m)` |
/// | `remove` | `O(n-i)` |
/// | `erase` | `O(n-i)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `assign_fill` | `O(n+m)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) buf: Window<T>,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0, without allocating.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::{Storage, Vector};
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// assert_eq!(vec.storage(), Storage::Unallocated);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector {
            buf: Window::empty(),
        }
    }

    /// Creates an empty Vector with room for [`MIN_CAP`] elements. If that allocation fails, the
    /// failure is ignored and the Vector is returned unallocated instead.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::with_default_cap();
    /// assert_eq!(vec.cap(), 16);
    /// ```
    pub fn with_default_cap() -> Vector<T> {
        match Window::allocate(MIN_CAP) {
            Ok(buf) => Vector { buf },
            Err(err) => {
                debug!(
                    "Vector<{}> skipping its default allocation: {}",
                    any::type_name::<T>(),
                    err
                );
                Vector::new()
            }
        }
    }

    /// Creates an empty Vector with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if `cap` is greater than [`max_size`](Vector::max_size).
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector::try_with_cap(cap).or_handle()
    }

    /// Creates an empty Vector with capacity exactly equal to `cap`.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the storage can't be allocated.
    pub fn try_with_cap(cap: usize) -> Result<Vector<T>, StorageError> {
        if cap == 0 {
            return Ok(Vector::new());
        }

        Window::allocate(cap).map(|buf| Vector { buf }).inspect_err(|err| {
            debug!("Vector<{}>::try_with_cap({cap}) failed: {err}", any::type_name::<T>())
        })
    }

    /// Creates a Vector holding `n` clones of `value`, with a capacity of at least [`MIN_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let vec = Vector::from_elem(3, &'a');
    /// assert_eq!(&*vec, &['a', 'a', 'a']);
    /// assert_eq!(vec.cap(), 16);
    /// ```
    pub fn from_elem(n: usize, value: &T) -> Vector<T>
    where
        T: CopyConstructible,
    {
        let mut vec = Vector::with_cap(cmp::max(n, MIN_CAP));
        // SAFETY: The Vector has just been created with room for n elements.
        unsafe { uninit::fill_n(vec.buf.ptr, n, value) };
        vec.buf.len = n;
        vec
    }

    /// Creates a Vector holding `n` default values, with a capacity of at least [`MIN_CAP`].
    pub fn with_len(n: usize) -> Vector<T>
    where
        T: DefaultConstructible,
    {
        let mut vec = Vector::with_cap(cmp::max(n, MIN_CAP));
        // SAFETY: The Vector has just been created with room for n elements.
        unsafe { uninit::fill_with(vec.buf.ptr, n, T::default) };
        vec.buf.len = n;
        vec
    }

    /// Creates a Vector holding clones of every element in `src`, with a capacity of at least
    /// [`MIN_CAP`].
    ///
    /// Elements are cloned one at a time, which is also how [`Clone`] works for Vectors. Use
    /// [`from_trivial`](Vector::from_trivial) for a single block copy of `Copy` values.
    pub fn from_slice(src: &[T]) -> Vector<T>
    where
        T: CopyConstructible,
    {
        let mut vec = Vector::with_cap(cmp::max(src.len(), MIN_CAP));
        // SAFETY: The Vector has just been created with room for the whole slice, and its block
        // can't overlap a borrowed slice.
        unsafe { uninit::copy_slice(src, vec.buf.ptr) };
        vec.buf.len = src.len();
        vec
    }

    /// Creates a Vector from a slice of trivially copyable values with a single block copy.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let vec = Vector::from_trivial(b"bytes");
    /// assert_eq!(&*vec, b"bytes");
    /// ```
    pub fn from_trivial(src: &[T]) -> Vector<T>
    where
        T: TriviallyCopyable,
    {
        let mut vec = Vector::with_cap(cmp::max(src.len(), MIN_CAP));
        // SAFETY: The Vector has just been created with room for the whole slice.
        unsafe { uninit::copy_trivial(src, vec.buf.ptr) };
        vec.buf.len = src.len();
        vec
    }

    /// Creates a Vector holding clones of every element in the cursor range `[first, last)`.
    ///
    /// Ranges that can be measured are allocated once, with a capacity of at least [`MIN_CAP`].
    /// Single-pass ranges are appended one element at a time.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// # use raw_vector::cursor::{IterCursor, Reverse, SliceCursor};
    /// let data = [1, 2, 3];
    /// let (first, last) = SliceCursor::range(&data);
    /// let vec = Vector::from_cursors(Reverse::new(last), Reverse::new(first));
    /// assert_eq!(&*vec, &[3, 2, 1]);
    ///
    /// let vec = Vector::from_cursors(IterCursor::new(data.iter()), IterCursor::end());
    /// assert_eq!(&*vec, &[1, 2, 3]);
    /// ```
    pub fn from_cursors<'a, C>(mut first: C, last: C) -> Vector<T>
    where
        T: CopyConstructible + 'a,
        C: Cursor<Item = &'a T>,
        C::Category: Walk<C>,
    {
        match cursor::measure(&first, &last) {
            Some(n) => {
                let mut vec = Vector::with_cap(cmp::max(n, MIN_CAP));
                // SAFETY: The Vector has just been created with room for n elements.
                unsafe { uninit::copy_n(first, n, vec.buf.ptr) };
                vec.buf.len = n;
                vec
            },
            None => {
                let mut vec = Vector::new();
                while first != last {
                    vec.push(first.get().clone());
                    first.step();
                }
                vec
            },
        }
    }

    /// Returns the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let vec = Vector::from([1_u8, 2, 3]);
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.buf.len
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.buf.len == 0
    }

    /// Returns the current capacity of the Vector.
    pub const fn cap(&self) -> usize {
        self.buf.cap
    }

    /// Returns the largest number of elements a Vector of `T` can hold.
    pub const fn max_size(&self) -> usize {
        Allocator::<T>::max_size()
    }

    /// Returns whether the Vector currently holds a block of memory.
    pub const fn storage(&self) -> Storage {
        self.buf.storage()
    }

    /// Returns a pointer to the first slot. The pointer is dangling while the Vector is
    /// [`Unallocated`](Storage::Unallocated).
    pub const fn as_ptr(&self) -> *const T {
        self.buf.ptr.as_ptr().cast_const()
    }

    /// Returns a mutable pointer to the first slot. See [`as_ptr`](Vector::as_ptr).
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr.as_ptr()
    }

    /// Returns a random access cursor at the first element.
    pub fn begin(&self) -> SliceCursor<'_, T> {
        SliceCursor::begin(self)
    }

    /// Returns a random access cursor one past the last element.
    pub fn end(&self) -> SliceCursor<'_, T> {
        SliceCursor::end(self)
    }

    /// Returns a cursor at the last element which walks towards the front.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// # use raw_vector::cursor;
    /// let vec = Vector::from([1, 2, 3]);
    /// let backwards: Vector<i32> = cursor::iter(vec.rbegin(), vec.rend()).copied().collect();
    /// assert_eq!(&*backwards, &[3, 2, 1]);
    /// ```
    pub fn rbegin(&self) -> Reverse<SliceCursor<'_, T>> {
        Reverse::new(self.end())
    }

    /// Returns the end of the reversed range started by [`rbegin`](Vector::rbegin).
    pub fn rend(&self) -> Reverse<SliceCursor<'_, T>> {
        Reverse::new(self.begin())
    }

    /// Returns an output cursor which pushes every value put into it onto this Vector.
    pub const fn back_inserter(&mut self) -> BackInserter<'_, T> {
        BackInserter { vec: self }
    }

    /// Pushes the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the Vector is already at [`max_size`](Vector::max_size).
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=16 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(vec.len(), 17);
    /// assert_eq!(vec.cap(), 24);
    /// ```
    pub fn push(&mut self, value: T) {
        self.try_push(value).or_handle()
    }

    /// Pushes the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the Vector needs to grow and can't. The Vector is unchanged
    /// and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), StorageError> {
        self.insert_raw(self.len(), 1, |slot| {
            // SAFETY: The slot is reserved for exactly one new element.
            unsafe { Allocator::construct(slot, value) }
        })
    }

    /// Constructs a new element at the end of the Vector from the result of `f`. The element is
    /// built directly in its final slot, which may be in a newly allocated block.
    ///
    /// If `f` panics, the Vector keeps its length, elements and capacity.
    ///
    /// # Panics
    /// Panics if the Vector is already at [`max_size`](Vector::max_size).
    pub fn push_with<F: FnOnce() -> T>(&mut self, f: F) {
        self.insert_raw(self.len(), 1, |slot| {
            // SAFETY: The slot is reserved for exactly one new element.
            unsafe { Allocator::construct_with(slot, f) }
        })
        .or_handle()
    }

    /// Constructs a new element at the end of the Vector from a fallible constructor.
    ///
    /// # Errors
    /// Returns [`ConstructError::Storage`] if the Vector can't grow, or [`ConstructError::Element`]
    /// if `f` fails. Either way the Vector is unchanged.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec: Vector<u32> = Vector::new();
    /// assert!(vec.try_push_with(|| "12".parse()).is_ok());
    /// assert!(vec.try_push_with(|| "twelve".parse()).unwrap_err().is_element());
    /// assert_eq!(&*vec, &[12]);
    /// ```
    pub fn try_push_with<E, F>(&mut self, f: F) -> Result<(), ConstructError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.try_insert_raw(self.len(), 1, |slot| {
            // SAFETY: The slot is reserved for exactly one new element.
            unsafe { Allocator::try_construct_with(slot, f) }
        })
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([0, 1, 2]);
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.buf.len == 0 {
            None
        } else {
            // Decrement len before reading, so the value is no longer owned by the Vector.
            self.buf.len -= 1;

            // SAFETY: The slot at the old last index is initialized and now outside of len.
            Some(unsafe { self.buf.slot(self.buf.len).read() })
        }
    }

    /// Inserts the provided value at the given index, moving later elements back.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([0, 1, 2]);
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(5, 300);
    /// assert_eq!(&*vec, &[0, 200, 100, 1, 2, 300]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).or_handle()
    }

    /// Inserts the provided value at the given index, moving later elements back.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the Vector needs to grow and can't. The Vector is unchanged.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), StorageError> {
        self.check_insert_index(index);
        self.insert_raw(index, 1, |slot| {
            // SAFETY: The slot is reserved for exactly one new element.
            unsafe { Allocator::construct(slot, value) }
        })
    }

    /// Constructs a new element at `index` from the result of `f`.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    pub fn insert_with<F: FnOnce() -> T>(&mut self, index: usize, f: F) {
        self.check_insert_index(index);
        self.insert_raw(index, 1, |slot| {
            // SAFETY: The slot is reserved for exactly one new element.
            unsafe { Allocator::construct_with(slot, f) }
        })
        .or_handle()
    }

    /// Constructs a new element at `index` from a fallible constructor.
    ///
    /// # Errors
    /// See [`try_push_with`](Vector::try_push_with).
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    pub fn try_insert_with<E, F>(&mut self, index: usize, f: F) -> Result<(), ConstructError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.check_insert_index(index);
        self.try_insert_raw(index, 1, |slot| {
            // SAFETY: The slot is reserved for exactly one new element.
            unsafe { Allocator::try_construct_with(slot, f) }
        })
    }

    /// Inserts `n` clones of `value` at `index`.
    ///
    /// If a clone panics, the clones already made are dropped and the Vector is unchanged.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 5]);
    /// vec.insert_n(1, 3, &0);
    /// assert_eq!(&*vec, &[1, 0, 0, 0, 5]);
    /// ```
    pub fn insert_n(&mut self, index: usize, n: usize, value: &T)
    where
        T: CopyConstructible,
    {
        self.try_insert_n(index, n, value).or_handle()
    }

    /// Inserts `n` clones of `value` at `index`.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the Vector needs to grow and can't. The Vector is unchanged.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    pub fn try_insert_n(&mut self, index: usize, n: usize, value: &T) -> Result<(), StorageError>
    where
        T: CopyConstructible,
    {
        self.check_insert_index(index);
        self.insert_raw(index, n, |dest| {
            // SAFETY: The destination is reserved for exactly n new elements.
            unsafe { uninit::fill_n(dest, n, value) };
        })
    }

    /// Inserts clones of every element in `src` at `index`.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    pub fn insert_slice(&mut self, index: usize, src: &[T])
    where
        T: CopyConstructible,
    {
        self.try_insert_slice(index, src).or_handle()
    }

    /// Inserts clones of every element in `src` at `index`.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the Vector needs to grow and can't. The Vector is unchanged.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    pub fn try_insert_slice(&mut self, index: usize, src: &[T]) -> Result<(), StorageError>
    where
        T: CopyConstructible,
    {
        self.check_insert_index(index);
        self.insert_raw(index, src.len(), |dest| {
            // SAFETY: The destination is reserved for src.len() new elements. The slots are
            // uninitialized, so they can't be part of a borrowed slice.
            unsafe { uninit::copy_slice(src, dest) };
        })
    }

    /// Inserts clones of every element in the cursor range `[first, last)` at `index`.
    ///
    /// Measurable ranges are cloned straight into place. Single-pass ranges are first collected
    /// into a scratch Vector, so the Vector is unchanged if reading or cloning panics.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length of the Vector.
    pub fn insert_cursors<'a, C>(&mut self, index: usize, first: C, last: C)
    where
        T: CopyConstructible + 'a,
        C: Cursor<Item = &'a T>,
        C::Category: Walk<C>,
    {
        self.check_insert_index(index);

        let inserted = match cursor::measure(&first, &last) {
            Some(n) => self.insert_raw(index, n, |dest| {
                // SAFETY: The destination is reserved for exactly n new elements.
                unsafe { uninit::copy_n(first, n, dest) };
            }),
            None => {
                let mut scratch = Vector::from_cursors(first, last);
                let n = scratch.len();
                self.insert_raw(index, n, |dest| {
                    // SAFETY: The destination is reserved for exactly n new elements, which are
                    // moved out of scratch. Setting its length to 0 stops them being dropped twice.
                    unsafe { uninit::move_n(scratch.buf.ptr, n, dest) };
                    scratch.buf.len = 0;
                })
            },
        };
        inserted.or_handle()
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1), 'e');
    /// assert_eq!(vec.remove(4), ' ');
    /// assert_eq!(vec, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index);

        // SAFETY: index < len, so the slot is initialized. It is refilled by the following
        // element straight away, and len is reduced by one to account for the move.
        unsafe {
            let value = self.buf.slot(index).read();
            uninit::move_n(
                self.buf.slot(index + 1),
                self.buf.len - index - 1,
                self.buf.slot(index),
            );
            self.buf.len -= 1;
            value
        }
    }

    /// Drops the elements in `range` and moves the following elements forward to fill the gap.
    /// The capacity is unchanged.
    ///
    /// If one of the destructors panics, the rest of the range is still dropped and the following
    /// elements are still moved forward before the panic continues.
    ///
    /// # Panics
    /// Panics if the range is out of bounds or decreasing.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2, 3, 4, 5]);
    /// vec.erase(2..3);
    /// assert_eq!(&*vec, &[1, 2, 4, 5]);
    /// vec.erase(..=1);
    /// assert_eq!(&*vec, &[4, 5]);
    /// ```
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        let (start, end) = self.check_range(range);
        let len = self.buf.len;
        let ptr = self.buf.ptr;

        self.buf.len = start;
        let _close = CloseGap {
            buf: &mut self.buf,
            from: end,
            to: start,
            tail: len - end,
        };

        // SAFETY: [start, end) is within the old len, so it is initialized, and it is no longer
        // owned by the window.
        unsafe { Allocator::destroy_n(ptr.add(start), end - start) }
    }

    /// Shortens the Vector to `len` elements, dropping the rest. Has no effect if the Vector is
    /// already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.buf.len {
            return;
        }

        let old_len = self.buf.len;
        self.buf.len = len;
        // SAFETY: [len, old_len) was initialized, and is no longer owned by the window.
        unsafe { Allocator::destroy_n(self.buf.slot(len), old_len - len) }
    }

    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Replaces the element at the provided index with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.check_index(index);
        mem::replace(&mut self[index], new_value)
    }

    /// Swaps the contents and storage of two Vectors.
    pub fn swap(&mut self, other: &mut Vector<T>) {
        mem::swap(&mut self.buf, &mut other.buf)
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements. If it doesn't,
    /// it is reallocated with a capacity of exactly `len + extra`.
    ///
    /// # Panics
    /// Panics if `len + extra` exceeds [`max_size`](Vector::max_size).
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).or_handle()
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the new block can't be allocated. The Vector is unchanged.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), StorageError> {
        if extra <= self.buf.spare() {
            return Ok(());
        }

        let max = self.max_size();
        let new_cap = self
            .buf
            .len
            .checked_add(extra)
            .filter(|cap| *cap <= max)
            .ok_or(CapacityExceeded {
                len: self.buf.len,
                additional: extra,
                max,
            })?;

        self.relocate(new_cap, "reserve").inspect_err(|err| {
            debug!("Vector<{}>::try_reserve({extra}) failed: {err}", any::type_name::<T>())
        })
    }

    /// Reallocates the Vector so that its capacity is equal to its length. An empty Vector releases
    /// its block and becomes [`Unallocated`](Storage::Unallocated).
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2, 3]);
    /// assert_eq!(vec.cap(), 16);
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.cap(), 3);
    /// vec.clear();
    /// vec.shrink_to_fit();
    /// assert!(vec.storage().is_unallocated());
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit().or_handle()
    }

    /// Reallocates the Vector so that its capacity is equal to its length.
    ///
    /// # Errors
    /// Returns a [`StorageError`] if the smaller block can't be allocated. The Vector is unchanged.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), StorageError> {
        if self.buf.cap == self.buf.len {
            Ok(())
        } else if self.buf.len == 0 {
            self.adopt(Window::empty(), "shrink");
            Ok(())
        } else {
            self.relocate(self.buf.len, "shrink")
        }
    }

    /// Resizes the Vector to `len` elements, filling new slots with default values.
    ///
    /// # Panics
    /// Panics if `len` exceeds [`max_size`](Vector::max_size).
    pub fn resize(&mut self, len: usize)
    where
        T: DefaultConstructible,
    {
        self.resize_with(len, T::default)
    }

    /// Resizes the Vector to `len` elements, filling new slots with clones of `value`.
    ///
    /// # Panics
    /// Panics if `len` exceeds [`max_size`](Vector::max_size).
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2]);
    /// vec.resize_value(4, &7);
    /// assert_eq!(&*vec, &[1, 2, 7, 7]);
    /// vec.resize_value(1, &7);
    /// assert_eq!(&*vec, &[1]);
    /// ```
    pub fn resize_value(&mut self, len: usize, value: &T)
    where
        T: CopyConstructible,
    {
        match len.checked_sub(self.buf.len) {
            None => self.truncate(len),
            Some(extra) => self.try_insert_n(self.buf.len, extra, value).or_handle(),
        }
    }

    /// Resizes the Vector to `len` elements, filling new slots with the results of calling `f`.
    ///
    /// # Panics
    /// Panics if `len` exceeds [`max_size`](Vector::max_size).
    pub fn resize_with<F: FnMut() -> T>(&mut self, len: usize, f: F) {
        match len.checked_sub(self.buf.len) {
            None => self.truncate(len),
            Some(extra) => self
                .insert_raw(self.buf.len, extra, |dest| {
                    // SAFETY: The destination is reserved for exactly extra new elements.
                    unsafe { uninit::fill_with(dest, extra, f) };
                })
                .or_handle(),
        }
    }

    /// Resizes the Vector to `len` elements, filling new slots from a fallible constructor.
    ///
    /// # Errors
    /// Returns [`ConstructError::Storage`] if the Vector can't grow, or [`ConstructError::Element`]
    /// with the first error from `f`. Either way the Vector is unchanged.
    pub fn try_resize_with<E, F>(&mut self, len: usize, f: F) -> Result<(), ConstructError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        match len.checked_sub(self.buf.len) {
            None => {
                self.truncate(len);
                Ok(())
            },
            Some(extra) => self.try_insert_raw(self.buf.len, extra, |dest| {
                // SAFETY: The destination is reserved for exactly extra new elements.
                unsafe { uninit::try_fill_with(dest, extra, f) }.map(|_| ())
            }),
        }
    }

    /// Replaces the contents of the Vector with `n` clones of `value`.
    ///
    /// If `n` exceeds the capacity, the replacement is built in a new block and the old contents
    /// are only dropped once it is complete. Otherwise the existing elements are assigned in place,
    /// keeping the capacity.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2, 3, 4, 5, 6, 7, 8]);
    /// vec.assign_fill(5, &0);
    /// assert_eq!(&*vec, &[0; 5]);
    /// assert_eq!(vec.cap(), 16);
    /// ```
    pub fn assign_fill(&mut self, n: usize, value: &T)
    where
        T: CopyConstructible,
    {
        if n > self.buf.cap {
            let mut replacement = Vector::from_elem(n, value);
            self.swap(&mut replacement);
            return;
        }

        let overlap = cmp::min(n, self.buf.len);
        for slot in &mut self[..overlap] {
            slot.clone_from(value);
        }

        if n > self.buf.len {
            let extra = n - self.buf.len;
            // SAFETY: n fits within the capacity, so the spare slots from len can take extra
            // elements.
            unsafe { uninit::fill_n(self.buf.slot(self.buf.len), extra, value) };
            self.buf.len = n;
        } else {
            self.truncate(n);
        }
    }

    /// Replaces the contents of the Vector with clones of the elements in `src`.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2, 3]);
    /// vec.assign_slice(&[9, 8]);
    /// assert_eq!(&*vec, &[9, 8]);
    /// ```
    pub fn assign_slice(&mut self, src: &[T])
    where
        T: CopyConstructible,
    {
        let (first, last) = SliceCursor::range(src);
        self.assign_cursors(first, last)
    }

    /// Replaces the contents of the Vector with clones of the elements in `[first, last)`.
    ///
    /// Measurable ranges follow the strategy of [`assign_fill`](Vector::assign_fill). Single-pass
    /// ranges are assigned over the existing elements one at a time, then either appended to or
    /// truncated, depending on which runs out first.
    pub fn assign_cursors<'a, C>(&mut self, mut first: C, last: C)
    where
        T: CopyConstructible + 'a,
        C: Cursor<Item = &'a T>,
        C::Category: Walk<C>,
    {
        let Some(n) = cursor::measure(&first, &last) else {
            let mut assigned = 0;
            while assigned < self.buf.len && first != last {
                self[assigned].clone_from(first.get());
                first.step();
                assigned += 1;
            }

            if first == last {
                self.truncate(assigned);
            } else {
                self.insert_cursors(self.buf.len, first, last);
            }
            return;
        };

        if n > self.buf.cap {
            let mut replacement = Vector::from_cursors(first, last);
            self.swap(&mut replacement);
            return;
        }

        let overlap = cmp::min(n, self.buf.len);
        for slot in &mut self[..overlap] {
            slot.clone_from(first.get());
            first.step();
        }

        if n > self.buf.len {
            let extra = n - self.buf.len;
            // SAFETY: n fits within the capacity, so the spare slots from len can take extra
            // elements.
            unsafe { uninit::copy_n(first, extra, self.buf.slot(self.buf.len)) };
            self.buf.len = n;
        } else {
            self.truncate(n);
        }
    }

    /// Appends bit copies of every element in `src`, with a single block copy.
    pub fn extend_trivial(&mut self, src: &[T])
    where
        T: TriviallyCopyable,
    {
        self.insert_raw(self.buf.len, src.len(), |dest| {
            // SAFETY: The destination is reserved for src.len() new elements.
            unsafe { uninit::copy_trivial(src, dest) };
        })
        .or_handle()
    }

    /// Makes room for `count` elements at `index` and has `build` construct them, where `build`
    /// must either initialize all `count` slots starting at the pointer it is given, or fail with
    /// every slot left uninitialized.
    ///
    /// With enough spare capacity, the new elements are built at the end of the Vector and rotated
    /// into place. Otherwise a new block is allocated, the new elements are built in it and the
    /// existing elements are moved around them. Nothing observable changes until `build` has
    /// succeeded.
    pub(crate) fn try_insert_raw<E, F>(
        &mut self,
        index: usize,
        count: usize,
        build: F,
    ) -> Result<(), ConstructError<E>>
    where
        F: FnOnce(NonNull<T>) -> Result<(), E>,
    {
        let len = self.buf.len;
        debug_assert!(index <= len);

        if count <= self.buf.spare() {
            // SAFETY: There are at least count uninitialized slots from len.
            build(unsafe { self.buf.slot(len) }).map_err(ConstructError::Element)?;
            self.buf.len += count;
            self.buf.as_mut_slice()[index..].rotate_right(count);
            return Ok(());
        }

        let new_cap = plan(len, count, self.max_size()).map_err(StorageError::from)?;
        let mut grown = Window::allocate(new_cap)?;

        // If build fails, grown is dropped holding no elements, which only frees its block.
        // SAFETY: new_cap >= len + count, so index + count slots fit after the returned pointer.
        build(unsafe { grown.slot(index) }).map_err(ConstructError::Element)?;

        // SAFETY: Both windows have room for the ranges involved and don't overlap. The elements
        // are moved, so the old window gives up ownership of them by having its len set to 0.
        unsafe {
            uninit::move_n(self.buf.ptr, index, grown.ptr);
            uninit::move_n(self.buf.slot(index), len - index, grown.slot(index + count));
        }
        grown.len = len + count;
        self.buf.len = 0;

        self.adopt(grown, "growth");
        Ok(())
    }

    /// [`try_insert_raw`](Vector::try_insert_raw) for a `build` which can't fail, other than by
    /// panicking.
    pub(crate) fn insert_raw<F>(&mut self, index: usize, count: usize, build: F) -> Result<(), StorageError>
    where
        F: FnOnce(NonNull<T>),
    {
        self.try_insert_raw(index, count, |dest| {
            build(dest);
            Ok::<(), Infallible>(())
        })
        .map_err(|err| match err {
            ConstructError::Storage(err) => err,
            ConstructError::Element(never) => match never {},
        })
    }

    /// Moves every element into a new block with exactly `new_cap` slots.
    pub(crate) fn relocate(&mut self, new_cap: usize, reason: &str) -> Result<(), StorageError> {
        let mut moved = Window::allocate(new_cap)?;
        // SAFETY: new_cap >= len and the blocks are distinct. The old window gives up ownership of
        // the moved elements by having its len set to 0.
        unsafe { uninit::move_n(self.buf.ptr, self.buf.len, moved.ptr) };
        moved.len = self.buf.len;
        self.buf.len = 0;

        self.adopt(moved, reason);
        Ok(())
    }

    /// Replaces the current window with `buf`. The current window must not hold any elements.
    fn adopt(&mut self, buf: Window<T>, reason: &str) {
        debug_assert_eq!(self.buf.len, 0);
        trace!(
            "Vector<{}> reallocated for {}: cap {} -> {}, {} elements moved",
            any::type_name::<T>(),
            reason,
            self.buf.cap,
            buf.cap,
            buf.len
        );
        self.buf = buf;
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub(crate) fn check_index(&self, index: usize) {
        if index >= self.buf.len {
            Err(IndexOutOfBounds {
                index,
                len: self.buf.len,
            })
            .throw()
        }
    }

    /// Checks that an element could be inserted at the provided index, which may be equal to len.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub(crate) fn check_insert_index(&self, index: usize) {
        if index > self.buf.len {
            Err(IndexOutOfBounds {
                index,
                len: self.buf.len,
            })
            .throw()
        }
    }

    /// Resolves `range` to a pair of start and end indices within self.
    ///
    /// # Panics
    /// Panics if either end is out of bounds, or if start is greater than end.
    pub(crate) fn check_range<R: RangeBounds<usize>>(&self, range: R) -> (usize, usize) {
        let len = self.buf.len;
        let start = match range.start_bound() {
            Bound::Included(start) => *start,
            Bound::Excluded(start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(end) => end.saturating_add(1),
            Bound::Excluded(end) => *end,
            Bound::Unbounded => len,
        };

        if end > len {
            Err(IndexOutOfBounds { index: end, len }).throw()
        }
        assert!(
            start <= end,
            "Range start {start} is greater than range end {end} for a Vector of length {len}!"
        );

        (start, end)
    }
}

/// Moves the `tail` elements at `from` down to `to` when dropped, then sets the length to match.
struct CloseGap<'a, T> {
    buf: &'a mut Window<T>,
    from: usize,
    to: usize,
    tail: usize,
}

impl<T> Drop for CloseGap<'_, T> {
    fn drop(&mut self) {
        // SAFETY: The tail is initialized and the gap before it is not, so moving the tail forward
        // leaves [0, to + tail) initialized.
        unsafe {
            uninit::move_n(self.buf.slot(self.from), self.tail, self.buf.slot(self.to));
        }
        self.buf.len = self.to + self.tail;
    }
}

/// An output cursor appending to a [`Vector`], returned by [`Vector::back_inserter`].
///
/// # Examples
/// ```
/// # use raw_vector::collections::contiguous::Vector;
/// # use raw_vector::cursor::OutputCursor;
/// let mut vec = Vector::from([1]);
/// let mut out = vec.back_inserter();
/// out.put(2);
/// out.put(3);
/// assert_eq!(&*vec, &[1, 2, 3]);
/// ```
pub struct BackInserter<'a, T> {
    vec: &'a mut Vector<T>,
}

impl<T> cursor::Categorized for BackInserter<'_, T> {
    type Category = cursor::Output;
}

impl<T> cursor::OutputCursor for BackInserter<'_, T> {
    type Value = T;

    fn put(&mut self, value: T) {
        self.vec.push(value);
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();

        let (lower, _) = iter.size_hint();
        if lower > self.buf.spare() {
            let new_cap = plan(self.buf.len, lower, self.max_size()).throw();
            self.relocate(new_cap, "extend").or_handle();
        }

        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Vector::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(value: [T; N]) -> Self {
        let mut vec = Vector::with_cap(cmp::max(N, MIN_CAP));
        let value = mem::ManuallyDrop::new(value);
        // SAFETY: The Vector has room for N elements, and the array is never dropped, so its
        // elements are moved rather than copied.
        unsafe { uninit::move_n(NonNull::from(&*value).cast(), N, vec.buf.ptr) };
        vec.buf.len = N;
        vec
    }
}

impl<T: CopyConstructible> From<&[T]> for Vector<T> {
    fn from(value: &[T]) -> Self {
        Vector::from_slice(value)
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.buf.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buf.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: A Vector uniquely owns its block and elements, so it is safe to send when T: Send.
unsafe impl<T: Send> Send for Vector<T> {}
// SAFETY: Vector's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs. This means that Vector<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for Vector<T> {}

impl<T: CopyConstructible> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Vector::from_slice(self)
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.buf.len)
            .field("cap", &self.buf.cap)
            .finish()
    }
}
