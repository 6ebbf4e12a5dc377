#![warn(missing_docs)]

pub mod error;
pub mod panic;
pub mod result;
pub mod tracked;
