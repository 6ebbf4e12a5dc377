use std::iter::FusedIterator;

use super::category::Input;
use super::cursor::{BidirectionalCursor, Categorized, Cursor, ForwardCursor, RandomAccessCursor};

/// A single-pass input cursor reading from any [`Iterator`]. Two cursors compare equal only when
/// both are exhausted, so `IterCursor::end()` is the matching end of every range.
///
/// # Examples
/// ```
/// # use raw_vector::cursor::{Cursor, IterCursor};
/// let mut first = IterCursor::new("ab".chars());
/// let last = IterCursor::end();
/// assert_eq!(first.get(), 'a');
/// first.step();
/// assert_eq!(first.get(), 'b');
/// first.step();
/// assert!(first == last);
/// ```
pub struct IterCursor<I: Iterator> {
    iter: Option<I>,
    current: Option<I::Item>,
}

impl<I: Iterator> IterCursor<I> {
    /// Creates a cursor positioned at the first item of `iter`.
    pub fn new(mut iter: I) -> IterCursor<I> {
        let current = iter.next();
        IterCursor {
            iter: Some(iter),
            current,
        }
    }

    /// Creates the exhausted cursor used as the end of a range.
    pub const fn end() -> IterCursor<I> {
        IterCursor {
            iter: None,
            current: None,
        }
    }

    /// Returns true if there is nothing left to read.
    pub const fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }
}

impl<I: Iterator> PartialEq for IterCursor<I> {
    fn eq(&self, other: &Self) -> bool {
        self.is_exhausted() && other.is_exhausted()
    }
}

impl<I: Iterator> Categorized for IterCursor<I> {
    type Category = Input;
}

impl<I> Cursor for IterCursor<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn get(&self) -> Self::Item {
        match &self.current {
            Some(item) => item.clone(),
            None => panic!("Can't read from an exhausted cursor!"),
        }
    }

    fn step(&mut self) {
        self.current = self.iter.as_mut().and_then(Iterator::next);
    }
}

/// A cursor which walks its base cursor backwards. A `Reverse` wrapping position `p` reads the
/// element just before `p`, so reversing `(first, last)` gives `(Reverse::new(last),
/// Reverse::new(first))`.
///
/// The wrapper keeps the category of its base, which must be at least bidirectional.
///
/// # Examples
/// ```
/// # use raw_vector::cursor::{self, Reverse, SliceCursor};
/// let data = [1, 2, 3];
/// let (first, last) = SliceCursor::range(&data);
/// let reversed: Vec<_> = cursor::iter(Reverse::new(last), Reverse::new(first)).copied().collect();
/// assert_eq!(reversed, [3, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reverse<C> {
    base: C,
}

impl<C: BidirectionalCursor> Reverse<C> {
    pub const fn new(base: C) -> Reverse<C> {
        Reverse { base }
    }

    /// Returns the underlying cursor, which points one past the element this cursor reads.
    pub fn base(&self) -> C {
        self.base.clone()
    }
}

impl<C: Categorized> Categorized for Reverse<C> {
    type Category = C::Category;
}

impl<C: BidirectionalCursor> Cursor for Reverse<C> {
    type Item = C::Item;

    fn get(&self) -> Self::Item {
        let mut prev = self.base.clone();
        prev.step_back();
        prev.get()
    }

    fn step(&mut self) {
        self.base.step_back();
    }
}

impl<C: BidirectionalCursor> ForwardCursor for Reverse<C> {}

impl<C: BidirectionalCursor> BidirectionalCursor for Reverse<C> {
    fn step_back(&mut self) {
        self.base.step();
    }
}

impl<C: RandomAccessCursor> RandomAccessCursor for Reverse<C> {
    fn jump(&mut self, n: isize) {
        self.base.jump(-n);
    }

    fn offset_from(&self, origin: &Self) -> isize {
        origin.base.offset_from(&self.base)
    }
}

/// Bridges a cursor range to a Rust [`Iterator`] yielding each item of `[first, last)`.
///
/// # Examples
/// ```
/// # use raw_vector::cursor::{self, SliceCursor};
/// let data = [1, 2, 3];
/// let (first, last) = SliceCursor::range(&data);
/// assert_eq!(cursor::iter(first, last).sum::<i32>(), 6);
/// ```
pub fn iter<C: Cursor>(first: C, last: C) -> Walker<C> {
    Walker { first, last }
}

/// The iterator returned by [`iter`].
#[derive(Debug, Clone)]
pub struct Walker<C> {
    first: C,
    last: C,
}

impl<C: Cursor> Iterator for Walker<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.first == self.last {
            None
        } else {
            let item = self.first.get();
            self.first.step();
            Some(item)
        }
    }
}

impl<C: BidirectionalCursor> DoubleEndedIterator for Walker<C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.first == self.last {
            None
        } else {
            self.last.step_back();
            Some(self.last.get())
        }
    }
}

impl<C: Cursor> FusedIterator for Walker<C> {}
