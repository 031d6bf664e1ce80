//! Profile persistence and other support code.

pub mod persistence;

pub use persistence::*;
