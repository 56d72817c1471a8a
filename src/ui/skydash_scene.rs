//! Skydash screen: the field canvas, the score panel, and the start and
//! game-over overlays.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::game_common::{
    centered_rect, create_game_layout, half_block_lines, render_info_panel_frame, render_modal,
    render_status_bar,
};
use crate::game::{GameLoop, RunEndCause, RunMode};
use crate::render::canvas::render_field;
use crate::render::scene::draw_scene;
use crate::render::sprite::{PixelImage, Sprite};
use crate::render::surface::Painter;

const INFO_PANEL_WIDTH: u16 = 22;
const OVERLAY_BACKGROUND: Color = Color::Rgb(12, 12, 18);

const PLAY_CONTROLS: &[(&str, &str)] = &[
    ("[Space/Up/k/Click]", "Jump"),
    ("[m]", "Sound"),
    ("[q]", "Quit"),
];
const MENU_CONTROLS: &[(&str, &str)] = &[("[Enter]", "Start"), ("[m]", "Sound"), ("[q]", "Quit")];

/// Everything the screen needs for one frame.
pub struct SceneView<'a> {
    pub game: &'a GameLoop,
    pub sprite: &'a Sprite,
    /// Decorative picture for the game-over screen, when one loaded.
    pub game_over_art: Option<&'a PixelImage>,
    pub now_ms: u64,
}

/// Render the whole Skydash screen into `area`.
pub fn render_skydash(frame: &mut Frame, area: Rect, view: &SceneView) {
    let layout = create_game_layout(frame, area, " Skydash ", Color::Cyan, INFO_PANEL_WIDTH);
    let session = &view.game.session;

    render_field(frame, layout.content, session.field, |surface| {
        let mut painter = Painter::new(surface);
        draw_scene(&mut painter, session, view.sprite, view.now_ms);
    });

    render_status_bar_content(frame, layout.status_bar, view.game);
    render_info_panel(frame, layout.info_panel, view.game);

    match session.mode {
        RunMode::Idle => render_start_screen(frame, layout.content, view.game),
        RunMode::Ended => render_game_over(frame, layout.content, view),
        RunMode::Playing => {}
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &GameLoop) {
    let session = &game.session;
    match session.mode {
        RunMode::Idle => render_status_bar(
            frame,
            area,
            "Press Enter to take off!",
            Color::Yellow,
            MENU_CONTROLS,
        ),
        RunMode::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", session.score),
            Color::Green,
            PLAY_CONTROLS,
        ),
        RunMode::Ended => render_status_bar(
            frame,
            area,
            &format!("Crashed with {} points", session.score),
            Color::Red,
            MENU_CONTROLS,
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &GameLoop) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }
    let session = &game.session;

    let (sound_label, sound_color) = if session.sound_enabled {
        ("ON", Color::Green)
    } else {
        ("OFF", Color::DarkGray)
    };

    let lines = vec![
        Line::from(Span::styled(
            " Skydash ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.best_score.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Sound: ", Style::default().fg(Color::DarkGray)),
            Span::styled(sound_label, Style::default().fg(sound_color)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Fire passed  +1",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " Coin         +5",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_start_screen(frame: &mut Frame, area: Rect, game: &GameLoop) {
    let modal = centered_rect(area, 36, 9);
    let inner = render_modal(frame, modal, " Skydash ", Color::Cyan);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Fly through the gaps in the fire.",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "Grab coins on the way.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Best: {}", game.session.best_score),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Start",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect, view: &SceneView) {
    let session = &view.game.session;
    let summary = view.game.last_run();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Score: {}", session.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Best: {}", session.best_score),
            Style::default().fg(Color::Yellow),
        )),
    ];
    if let Some(summary) = summary {
        let cause = match summary.cause {
            RunEndCause::Boundary => "You left the sky.",
            RunEndCause::Obstacle => "You flew into the fire.",
        };
        lines.push(Line::from(Span::styled(
            cause,
            Style::default().fg(Color::Gray),
        )));
        if summary.new_best {
            lines.push(Line::from(Span::styled(
                "New best!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
    }
    if let Some(art) = view.game_over_art {
        lines.push(Line::from(""));
        lines.extend(half_block_lines(art, OVERLAY_BACKGROUND));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Play again",
        Style::default().fg(Color::DarkGray),
    )));

    let art_width = view.game_over_art.map_or(0, |art| art.columns as u16);
    let width = art_width.max(30) + 4;
    let height = lines.len() as u16 + 2;
    let modal = centered_rect(area, width, height);
    let inner = render_modal(frame, modal, " Game Over ", Color::Red);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::game::{end_run, Field};
    use crate::storage::MemoryStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn new_game() -> GameLoop {
        GameLoop::new(
            Field::default(),
            Box::new(MemoryStore::default()),
            Box::new(SilentAudio),
            true,
        )
    }

    fn screen_text(game: &GameLoop, art: Option<&PixelImage>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 34)).unwrap();
        let sprite = Sprite::Placeholder;
        terminal
            .draw(|frame| {
                let view = SceneView {
                    game,
                    sprite: &sprite,
                    game_over_art: art,
                    now_ms: 0,
                };
                render_skydash(frame, frame.size(), &view);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_start_screen_shows_best() {
        let mut game = new_game();
        game.session.best_score = 42;
        let text = screen_text(&game, None);
        assert!(text.contains("[Enter] Start"));
        assert!(text.contains("Best: 42"));
        assert!(text.contains("Sound: ON"));
    }

    #[test]
    fn test_game_over_shows_scores() {
        let mut game = new_game();
        game.handle(crate::game::Command::Start, 0);
        game.session.score = 7;
        end_run(&mut game.session, RunEndCause::Obstacle);
        let text = screen_text(&game, None);
        assert!(text.contains("Game Over"));
        assert!(text.contains("Score: 7"));
        assert!(text.contains("Best: 7"));
    }

    #[test]
    fn test_game_over_art_rendered() {
        let mut game = new_game();
        game.handle(crate::game::Command::Start, 0);
        end_run(&mut game.session, RunEndCause::Boundary);
        let art = PixelImage {
            columns: 4,
            rows: 2,
            pixels: vec![Some(Color::Rgb(200, 0, 0)); 8],
        };
        let text = screen_text(&game, Some(&art));
        assert!(text.contains("\u{2580}\u{2580}\u{2580}\u{2580}"));
    }

    #[test]
    fn test_playing_hides_overlays() {
        let mut game = new_game();
        game.handle(crate::game::Command::Start, 0);
        game.session.sound_enabled = false;
        let text = screen_text(&game, None);
        assert!(!text.contains("[Enter] Start"));
        assert!(!text.contains("Game Over"));
        assert!(text.contains("Sound: OFF"));
    }
}
