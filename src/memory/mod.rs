//! Manual memory management: typed allocation, placement construction and destruction, and bulk
//! algorithms over uninitialized memory.

mod allocator;
pub mod uninit;

pub use allocator::*;
