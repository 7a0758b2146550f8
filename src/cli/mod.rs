//! Command line interface for vgrab

pub mod args;
pub mod output;
pub mod prompt;

pub use args::Args;
