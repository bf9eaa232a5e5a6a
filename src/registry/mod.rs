//! Registry of item descriptors shared between layouts.

mod core;

pub use core::{ItemDescriptor, LayoutRegistry};
