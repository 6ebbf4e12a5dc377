//! A growable array over manually managed memory, and the pieces it is built from.
//!
//! # Purpose
//! [`Vector`](collections::contiguous::Vector) owns a raw block of memory and decides itself when
//! values in it are created, moved and destroyed. Getting that right under failure is the interesting
//! part, since an allocation can fail and a `clone` can panic half way through a bulk copy. Every
//! operation here either completes or leaves the container as it was, and never leaks or double
//! drops. Erasure is the exception, where a panicking destructor leaves the container consistent
//! but shorter.
//!
//! # Layout
//! The crate is layered, with each module only depending on the ones before it:
//! - [`traits`]: compile-time capability queries, such as whether a type is trivially destructible.
//! - [`cursor`]: position-based cursors with an iterator category model, and algorithms which pick
//!   their strategy from a cursor's category at compile time.
//! - [`memory`]: the typed [`Allocator`](memory::Allocator) and the bulk algorithms over
//!   uninitialized memory in [`memory::uninit`], which roll back on failure.
//! - [`collections`]: the [`Vector`](collections::contiguous::Vector) itself.
//!
//! # Error Handling
//! Most users don't want to handle the possibility of a capacity overflow every time they push
//! into a Vector, so the main API panics (or calls [`handle_alloc_error`](std::alloc::handle_alloc_error)
//! on allocation failure, as the standard collections do). Each such method has a `try_` variant
//! returning a strongly typed error from [`error`] instead.
//!
//! # Logging
//! Reallocations are reported through the [`log`] facade at the trace level, and silently handled
//! allocation failures at the debug level. No logger is installed by this crate.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;
pub mod cursor;
pub mod memory;
pub mod traits;

pub(crate) mod util;

pub use util::error;
