//! Skydash - a terminal side-scrolling flyer.
//!
//! The player falls under gravity, flaps through gaps between columns of
//! fire and collects coins. The library holds everything but the terminal
//! event loop, so the game can be driven and checked headlessly.

pub mod audio;
pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod render;
pub mod storage;
pub mod ui;
pub mod utils;
