//! A module containing [`Vector`] and associated types.
//!
//! Other than the Vector itself, this includes [`IntoIter`] for owned iteration, [`BackInserter`]
//! for appending through the cursor interface and the growth [`plan`]. [`IterMut`](std::slice::IterMut)
//! and [`Iter`](std::slice::Iter) from [`std::slice`] are used for borrowed iteration.
//!
//! [`Vector`] and [`Storage`] are also re-exported under the parent module.

mod iter;
mod plan;
mod tests;
mod vector;
mod window;

pub use iter::*;
pub use plan::*;
pub use vector::*;
pub use window::Storage;
