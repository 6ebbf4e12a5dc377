//! Contiguous collection types. Namely [`Vector`] for contiguous collections that vary in size at
//! runtime.
#![warn(missing_docs)]

pub mod vector;

#[doc(inline)]
pub use vector::{Storage, Vector};
