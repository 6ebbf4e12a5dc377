use std::fmt::{self, Debug, Formatter};
use std::ptr;

use super::category::RandomAccess;
use super::cursor::{BidirectionalCursor, Categorized, Cursor, ForwardCursor, RandomAccessCursor};

/// A random access cursor over a borrowed slice. Positions range from `0` to `len` inclusive, where
/// `len` is the end position and can't be read.
pub struct SliceCursor<'a, T> {
    pub(crate) slice: &'a [T],
    pub(crate) pos: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Creates a cursor at the first element of `slice`.
    pub const fn begin(slice: &'a [T]) -> SliceCursor<'a, T> {
        SliceCursor { slice, pos: 0 }
    }

    /// Creates a cursor at the end position of `slice`.
    pub const fn end(slice: &'a [T]) -> SliceCursor<'a, T> {
        SliceCursor {
            slice,
            pos: slice.len(),
        }
    }

    /// Creates the `(first, last)` pair covering all of `slice`.
    pub const fn range(slice: &'a [T]) -> (SliceCursor<'a, T>, SliceCursor<'a, T>) {
        (Self::begin(slice), Self::end(slice))
    }

    /// Returns the current position as an index into the underlying slice.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the elements from this cursor up to `last` as a slice, which is what block copies
    /// operate on.
    ///
    /// # Panics
    /// Panics if `last` belongs to a different slice or is behind `self`.
    pub fn as_slice_until(&self, last: &SliceCursor<'a, T>) -> &'a [T] {
        assert!(
            ptr::eq(self.slice, last.slice),
            "Cursors must belong to the same slice!"
        );
        &self.slice[self.pos..last.pos]
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> PartialEq for SliceCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.slice, other.slice) && self.pos == other.pos
    }
}

impl<T> Eq for SliceCursor<'_, T> {}

impl<T> Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("pos", &self.pos)
            .field("len", &self.slice.len())
            .finish()
    }
}

impl<T> Categorized for SliceCursor<'_, T> {
    type Category = RandomAccess;
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;

    fn get(&self) -> Self::Item {
        &self.slice[self.pos]
    }

    fn step(&mut self) {
        self.jump(1);
    }
}

impl<T> ForwardCursor for SliceCursor<'_, T> {}

impl<T> BidirectionalCursor for SliceCursor<'_, T> {
    fn step_back(&mut self) {
        self.jump(-1);
    }
}

impl<T> RandomAccessCursor for SliceCursor<'_, T> {
    fn jump(&mut self, n: isize) {
        self.pos = self
            .pos
            .checked_add_signed(n)
            .filter(|pos| *pos <= self.slice.len())
            .expect("Cursor moved outside of its slice!");
    }

    fn offset_from(&self, origin: &Self) -> isize {
        self.pos as isize - origin.pos as isize
    }
}
