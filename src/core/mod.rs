//! Tick pipeline, game state, and tuning constants.

pub mod constants;
pub mod events;
pub mod game_logic;
pub mod game_state;
pub mod tick;

pub use constants::*;
pub use events::*;
pub use game_logic::*;
pub use game_state::*;
pub use tick::*;
