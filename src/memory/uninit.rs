//! Bulk construction into uninitialized memory.
//!
//! Every function here writes into a destination which holds no live values and returns the end of
//! the range it constructed. Element-wise operations run under a guard: if constructing the `k`th
//! element panics or fails, the `k` elements already built are dropped again before the failure
//! reaches the caller, so the destination is left fully uninitialized either way.

use std::mem;
use std::ptr::{self, NonNull};

use super::allocator::Allocator;
use crate::cursor::Cursor;
use crate::traits::{Capabilities, CopyConstructible, TriviallyCopyable};

/// Tracks the elements constructed so far at the start of a destination range, and drops them if
/// it goes out of scope before [`finish`](Partial::finish) is called.
struct Partial<T> {
    start: NonNull<T>,
    done: usize,
}

impl<T> Partial<T> {
    const fn new(start: NonNull<T>) -> Partial<T> {
        Partial { start, done: 0 }
    }

    /// Constructs `value` in the next slot.
    ///
    /// # Safety
    /// The slot after the last constructed element must be valid for writes.
    unsafe fn push(&mut self, value: T) {
        // SAFETY: The caller guarantees that the next slot is valid for writes.
        unsafe { Allocator::construct(self.start.add(self.done), value) };
        self.done += 1;
    }

    /// Disarms the guard, returning the end of the constructed range.
    fn finish(self) -> NonNull<T> {
        // SAFETY: done slots have been written starting at start, so the end is within (or one
        // past) the same allocation.
        let end = unsafe { self.start.add(self.done) };
        mem::forget(self);
        end
    }
}

impl<T> Drop for Partial<T> {
    fn drop(&mut self) {
        // SAFETY: Exactly the first done slots have been constructed and nothing else owns them.
        unsafe { Allocator::destroy_n(self.start, self.done) }
    }
}

/// Returns the number of elements between two pointers into the same allocation.
///
/// # Safety
/// `first` and `last` must belong to the same allocation with `first <= last`.
unsafe fn span<T>(first: NonNull<T>, last: NonNull<T>) -> usize {
    if T::ZERO_SIZED {
        0
    } else {
        // SAFETY: Upheld by the caller.
        unsafe { last.offset_from(first) as usize }
    }
}

/// Clones every element of `[first, last)` into the uninitialized memory at `dest`.
///
/// Values are always cloned one at a time. [`copy_trivial`] is the block copy for
/// [`TriviallyCopyable`] values and has to be chosen explicitly.
///
/// # Safety
/// `dest` must be valid for writes of as many elements as the range holds.
pub unsafe fn copy<'a, T, C>(mut first: C, last: &C, dest: NonNull<T>) -> NonNull<T>
where
    T: CopyConstructible + 'a,
    C: Cursor<Item = &'a T>,
{
    let mut partial = Partial::new(dest);
    while first != *last {
        // SAFETY: The caller guarantees room for every element of the range.
        unsafe { partial.push(first.get().clone()) };
        first.step();
    }
    partial.finish()
}

/// Clones every element of `src` into the uninitialized memory at `dest`.
///
/// # Safety
/// `dest` must be valid for writes of `src.len()` elements and must not overlap `src`.
pub unsafe fn copy_slice<T: CopyConstructible>(src: &[T], dest: NonNull<T>) -> NonNull<T> {
    let mut partial = Partial::new(dest);
    for value in src {
        // SAFETY: The caller guarantees room for src.len() elements.
        unsafe { partial.push(value.clone()) };
    }
    partial.finish()
}

/// Clones `n` elements starting at `first` into the uninitialized memory at `dest`, returning the
/// cursor after the last element read along with the end of the constructed range.
///
/// # Safety
/// `dest` must be valid for writes of `n` elements and `first` must have at least `n` readable
/// elements ahead of it.
pub unsafe fn copy_n<'a, T, C>(mut first: C, n: usize, dest: NonNull<T>) -> (C, NonNull<T>)
where
    T: CopyConstructible + 'a,
    C: Cursor<Item = &'a T>,
{
    let mut partial = Partial::new(dest);
    for _ in 0..n {
        // SAFETY: The caller guarantees room for n elements.
        unsafe { partial.push(first.get().clone()) };
        first.step();
    }
    (first, partial.finish())
}

/// Copies `src` into the uninitialized memory at `dest` as a single block.
///
/// # Safety
/// `dest` must be valid for writes of `src.len()` elements and must not overlap `src`.
pub unsafe fn copy_trivial<T: TriviallyCopyable>(src: &[T], dest: NonNull<T>) -> NonNull<T> {
    // SAFETY: The caller guarantees that dest is valid and disjoint. Copying a Copy type can't
    // fail, so there is nothing to roll back.
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), dest.as_ptr(), src.len());
        dest.add(src.len())
    }
}

/// Fills `[dest, end)` with clones of `value`.
///
/// Zero-sized types have no measurable pointer ranges, so this constructs nothing for them. Use
/// [`fill_n`] when the count is known.
///
/// # Safety
/// `[dest, end)` must be uninitialized memory in one allocation, with `dest <= end`.
pub unsafe fn fill<T>(dest: NonNull<T>, end: NonNull<T>, value: &T) -> NonNull<T>
where
    T: CopyConstructible,
{
    // SAFETY: The caller guarantees that both pointers are in the same allocation, in order.
    let n = unsafe { span(dest, end) };
    // SAFETY: The range covers exactly n writable slots.
    unsafe { fill_n(dest, n, value) }
}

/// Fills `n` slots starting at `dest` with clones of `value`.
///
/// # Safety
/// `dest` must be valid for writes of `n` elements.
pub unsafe fn fill_n<T: CopyConstructible>(dest: NonNull<T>, n: usize, value: &T) -> NonNull<T> {
    let mut partial = Partial::new(dest);
    for _ in 0..n {
        // SAFETY: The caller guarantees room for n elements.
        unsafe { partial.push(value.clone()) };
    }
    partial.finish()
}

/// Fills `n` slots starting at `dest` with bit copies of `value`.
///
/// # Safety
/// `dest` must be valid for writes of `n` elements.
pub unsafe fn fill_trivial<T: TriviallyCopyable>(dest: NonNull<T>, n: usize, value: T) -> NonNull<T> {
    for i in 0..n {
        // SAFETY: The caller guarantees room for n elements.
        unsafe { dest.add(i).write(value) };
    }
    // SAFETY: n elements were written from dest.
    unsafe { dest.add(n) }
}

/// Fills `n` slots starting at `dest` with the results of calling `f` once per slot, in order.
///
/// # Safety
/// `dest` must be valid for writes of `n` elements.
pub unsafe fn fill_with<T, F>(dest: NonNull<T>, n: usize, mut f: F) -> NonNull<T>
where
    F: FnMut() -> T,
{
    let mut partial = Partial::new(dest);
    for _ in 0..n {
        // SAFETY: The caller guarantees room for n elements.
        unsafe { partial.push(f()) };
    }
    partial.finish()
}

/// Fills `n` slots starting at `dest` from a fallible constructor. On the first error, everything
/// constructed so far is dropped and the error is returned.
///
/// # Errors
/// Returns the first error produced by `f`.
///
/// # Safety
/// `dest` must be valid for writes of `n` elements.
pub unsafe fn try_fill_with<T, E, F>(dest: NonNull<T>, n: usize, mut f: F) -> Result<NonNull<T>, E>
where
    F: FnMut() -> Result<T, E>,
{
    let mut partial = Partial::new(dest);
    for _ in 0..n {
        let value = f()?;
        // SAFETY: The caller guarantees room for n elements.
        unsafe { partial.push(value) };
    }
    Ok(partial.finish())
}

/// Relocates the values in `[first, last)` to `dest`. The source range is logically uninitialized
/// afterwards and must not be dropped.
///
/// Zero-sized types have no measurable pointer ranges, so nothing is moved for them. Use
/// [`move_n`] when the count is known.
///
/// # Safety
/// `[first, last)` must hold initialized values in one allocation and `dest` must be valid for
/// writes of the same number of elements.
pub unsafe fn move_range<T>(first: NonNull<T>, last: NonNull<T>, dest: NonNull<T>) -> NonNull<T> {
    // SAFETY: The caller guarantees that both pointers are in the same allocation, in order.
    let n = unsafe { span(first, last) };
    // SAFETY: Upheld by the caller.
    unsafe { move_n(first, n, dest) }
}

/// Relocates `n` values from `src` to `dest`. The ranges may overlap. The values left behind at
/// `src` are logically uninitialized and must not be dropped.
///
/// Every type is [trivially movable](Capabilities::TRIVIALLY_MOVABLE), so relocation is a single
/// block copy and never runs user code.
///
/// # Safety
/// `src` must hold `n` initialized values and `dest` must be valid for writes of `n` elements.
pub unsafe fn move_n<T>(src: NonNull<T>, n: usize, dest: NonNull<T>) -> NonNull<T> {
    const { assert!(T::TRIVIALLY_MOVABLE) };
    // SAFETY: Upheld by the caller. Moves are bitwise, so this can't fail part way through.
    unsafe {
        ptr::copy(src.as_ptr(), dest.as_ptr(), n);
        dest.add(n)
    }
}
