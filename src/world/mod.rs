//! Stages, areas, structures, and procedural population.

pub mod areas;
pub mod generator;
pub mod types;

pub use areas::*;
pub use generator::*;
pub use types::*;
