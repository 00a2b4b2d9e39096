//! Data models: catalogue records and validation outcomes

mod outcome;
mod puzzle;

pub use outcome::*;
pub use puzzle::*;
