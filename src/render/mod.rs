//! Rendering of the playing field.
//!
//! `surface` defines the drawing capability and the canvas-style painter,
//! `scene` draws the game through it, `sprite` loads images, and `canvas`
//! adapts it all onto a ratatui half-block canvas.

pub mod canvas;
pub mod scene;
pub mod sprite;
pub mod surface;

pub use surface::{DrawSurface, Painter};
