//! Skydash gameplay.
//!
//! The player falls under gravity and flaps through scrolling fire gaps while
//! picking up coins. `types` holds the data, `logic` the per-frame rules, and
//! `runner` the loop that wires them to audio and persistence.

pub mod logic;
pub mod runner;
pub mod types;

pub use logic::*;
pub use runner::*;
pub use types::*;
