use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::slice;

use super::Vector;
use super::window::Window;
use crate::memory::Allocator;

impl<T> IntoIterator for Vector<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buf: self.buf,
            head: 0,
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A type for owned iteration over a [`Vector`]. See [`Vector::into_iter`].
///
/// The iterator takes over the Vector's block. Elements in `[head, len)` are still owned, while
/// those before `head` have been yielded already.
pub struct IntoIter<T> {
    buf: Window<T>,
    head: usize,
}

impl<T> IntoIter<T> {
    /// Returns the elements which haven't been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        &self.buf.as_slice()[self.head..]
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (head, len) = (self.head, self.buf.len);
        // The window only frees its block, the remaining elements are dropped here.
        self.buf.len = 0;
        // SAFETY: [head, len) holds the elements which haven't been yielded.
        unsafe { Allocator::destroy_n(self.buf.slot(head), len - head) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head < self.buf.len {
            // SAFETY: head < len, so the element is initialized and hasn't been yielded.
            let value = unsafe { self.buf.slot(self.head).read() };
            self.head += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.buf.len - self.head;
        (left, Some(left))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head < self.buf.len {
            self.buf.len -= 1;
            // SAFETY: The old last element is initialized and is now outside of len.
            Some(unsafe { self.buf.slot(self.buf.len).read() })
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {}

// SAFETY: IntoIter uniquely owns its remaining elements, like the Vector it came from.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: Shared access only hands out shared references to the remaining elements.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
