//! Cascading displacement after a single item is moved.

mod core;

pub use core::{Arena, move_element};
