//! Pure data structures published by the pollers.

pub mod health;
pub mod order;
pub mod timestamp;

pub use health::*;
pub use order::*;
