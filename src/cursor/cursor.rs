use super::category::{Category, Output};

/// A type which declares an iterator category. This is the marker that
/// [`category_of!`](crate::category_of) looks for.
pub trait Categorized {
    type Category: Category;
}

/// A position within a sequence which can be read and moved forwards. Unlike an [`Iterator`], a
/// cursor doesn't know where its sequence ends: a range is described by two cursors, `first` and
/// `last`, where `last` is reachable from `first` and is never read.
///
/// Implementations must declare the strongest [`Category`] they actually support and implement
/// the matching sub-trait ([`ForwardCursor`], [`BidirectionalCursor`] or [`RandomAccessCursor`]).
/// The free functions in this module only accept cursors whose declared category and implemented
/// traits agree.
pub trait Cursor: Categorized + PartialEq {
    type Item;

    /// Reads the value at the current position.
    ///
    /// # Panics
    /// May panic if the cursor is at the end of its range.
    fn get(&self) -> Self::Item;

    /// Moves to the next position.
    fn step(&mut self);
}

/// A cursor which can be copied to traverse the same range more than once.
pub trait ForwardCursor: Cursor + Clone {}

/// A cursor which can also move backwards.
pub trait BidirectionalCursor: ForwardCursor {
    /// Moves to the previous position.
    fn step_back(&mut self);
}

/// A cursor which can move by any number of positions in constant time.
pub trait RandomAccessCursor: BidirectionalCursor {
    /// Moves by `n` positions, backwards if `n` is negative.
    fn jump(&mut self, n: isize);

    /// Returns the signed number of positions from `origin` to `self`.
    fn offset_from(&self, origin: &Self) -> isize;
}

/// A write-only position which accepts values one at a time.
pub trait OutputCursor: Categorized<Category = Output> {
    type Value;

    /// Writes `value` at the current position and moves on.
    fn put(&mut self, value: Self::Value);
}
