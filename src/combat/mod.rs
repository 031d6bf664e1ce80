//! Enemies, damage resolution, elements, and attack pacing.

pub mod ai;
pub mod element;
pub mod resolver;
pub mod types;

pub use ai::*;
pub use element::*;
pub use resolver::*;
pub use types::*;
