//! Player state, base attributes, and derived combat stats.

pub mod attributes;
pub mod derived_stats;
pub mod player;

pub use attributes::*;
pub use derived_stats::*;
pub use player::*;
