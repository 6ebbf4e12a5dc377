//! Position-based cursors and the iterator category model.
//!
//! A cursor is a position in a sequence. What it can do is described by its [`Category`], one of
//! five zero-sized tags forming a lattice: [`Input`] ⊂ [`Forward`] ⊂ [`Bidirectional`] ⊂
//! [`RandomAccess`], with [`Output`] on its own. Algorithms such as [`distance`] and [`advance`]
//! are implemented once per tag (see [`Walk`]) and picked through the cursor's declared category,
//! so a random access cursor gets constant time arithmetic and everything else walks, without a
//! runtime branch.
//!
//! Provided cursors are [`SliceCursor`] (random access), [`IterCursor`] (single pass input over any
//! [`Iterator`]) and the [`Reverse`] wrapper. [`iter`] turns a cursor range back into an
//! [`Iterator`].

mod adapt;
mod category;
mod cursor;
mod dispatch;
mod slice;

pub use adapt::*;
pub use category::*;
pub use cursor::*;
pub use dispatch::*;
pub use slice::*;
