//! Error types reported by the allocation layer and the containers built on it.
//!
//! Errors are split by cause, so that callers of the `try_` APIs can tell an exhausted allocator
//! ([`AllocFailure`]) apart from an unrepresentable request ([`CapacityExceeded`]) or a failing
//! element constructor ([`ConstructError::Element`]).

use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// A positional argument was outside of the live elements of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The requested index.
    pub index: usize,
    /// The length of the collection at the time of the access.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// A request for `len + additional` elements can't be represented, because it would exceed the
/// maximum number of elements (`max`) for the element type. Nothing is allocated when this is
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    /// The number of elements already held.
    pub len: usize,
    /// The number of elements requested on top of `len`.
    pub additional: usize,
    /// The maximum number of elements for the element type.
    pub max: usize,
}

impl Display for CapacityExceeded {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Capacity exceeded! Can't hold {} + {} elements with a maximum of {}.",
            self.len, self.additional, self.max
        )
    }
}

impl Error for CapacityExceeded {}

/// The global allocator couldn't provide a block for the contained [`Layout`]. No memory was
/// claimed, so there is nothing to roll back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailure {
    /// The layout of the refused block.
    pub layout: Layout,
}

impl Display for AllocFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to allocate {} bytes with alignment {}!",
            self.layout.size(),
            self.layout.align()
        )
    }
}

impl Error for AllocFailure {}

/// Any failure to obtain raw storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum StorageError {
    /// The allocator refused the block.
    AllocFailure(AllocFailure),
    /// The block would be too large to represent.
    CapacityExceeded(CapacityExceeded),
}

/// The error returned by operations that build elements with a fallible constructor. Either
/// storage couldn't be obtained, or the constructor itself returned `E`.
#[derive(Debug, PartialEq, Eq, IsVariant)]
pub enum ConstructError<E> {
    /// Storage for the new elements couldn't be obtained.
    Storage(StorageError),
    /// The element constructor failed.
    Element(E),
}

impl<E> From<StorageError> for ConstructError<E> {
    fn from(value: StorageError) -> Self {
        ConstructError::Storage(value)
    }
}

impl<E> ConstructError<E> {
    /// Returns the constructor's error, if that was the cause.
    pub fn into_element(self) -> Option<E> {
        match self {
            ConstructError::Element(err) => Some(err),
            ConstructError::Storage(_) => None,
        }
    }
}

impl<E: Display> Display for ConstructError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConstructError::Storage(err) => write!(f, "{}", err),
            ConstructError::Element(err) => write!(f, "Element construction failed: {}", err),
        }
    }
}

impl<E: Error + 'static> Error for ConstructError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConstructError::Storage(err) => Some(err),
            ConstructError::Element(err) => Some(err),
        }
    }
}
