//! Per-item download execution for vgrab

pub mod item;

pub use item::*;
