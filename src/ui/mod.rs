//! Terminal UI.

pub mod game_common;
pub mod skydash_scene;

use ratatui::Frame;

pub use skydash_scene::SceneView;

/// Main UI drawing function.
pub fn draw_ui(frame: &mut Frame, view: &SceneView) {
    let size = frame.size();
    skydash_scene::render_skydash(frame, size, view);
}
