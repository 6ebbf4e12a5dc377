//! Collection types built on the manual memory management in [`memory`](crate::memory).
//!
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves writing some of the more repetitive functionality.

#[cfg(feature = "contiguous")]
pub mod contiguous;
