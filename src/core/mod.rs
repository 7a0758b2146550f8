//! Core orchestration logic for vgrab

pub mod orchestrator;
pub mod outcome;
pub mod progress;
pub mod selector;
pub mod stream;
pub mod target;

pub use orchestrator::*;
pub use outcome::*;
pub use progress::*;
pub use selector::*;
pub use stream::*;
pub use target::*;
