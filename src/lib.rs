//! Wayfarer - Side-Scrolling Idle RPG Simulation Library
//!
//! This module exposes the game simulation for hosts, the balance
//! simulator, and tests. It contains no rendering or input handling; a
//! host feeds `InputState` into `game_tick` and draws from the returned
//! events and the `SimulationState`.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;
pub mod utils;
pub mod world;
