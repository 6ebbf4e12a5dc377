//! Compile-time capability queries over value types.
//!
//! The memory algorithms in [`memory`](crate::memory) use these to decide whether a range of
//! values can be handled in bulk (bit copies, skipped destructors) or has to be processed one
//! element at a time. Static choices are made through trait bounds and the associated constants of
//! [`Capabilities`]; the `is_*!` macros answer the same questions for concrete types without
//! failing to compile when the answer is no.

mod capability;

pub use capability::*;
