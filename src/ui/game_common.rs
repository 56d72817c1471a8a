//! Shared layout pieces: bordered game frame, status bar, info panel,
//! centred modal boxes and half-block pictures.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::render::sprite::PixelImage;

/// Upper half block: fg fills the top half, bg the bottom half.
const HALF_TOP: char = '\u{2580}';

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Playing field, top left inside the outer border.
    pub content: Rect,
    /// Two-line status bar under the field.
    pub status_bar: Rect,
    /// Right-hand info panel.
    pub info_panel: Rect,
}

/// Create the bordered game layout.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [content area]                │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a 2-line status bar: message, then `[key] action` hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render the info panel border and return its inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A `width`×`height` rectangle centred in `area`, clipped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Clear `area`, draw a titled border around it and return the inner area.
pub fn render_modal(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Pack pairs of image rows into terminal lines using `▀`.
/// Transparent pixels show `background`.
pub fn half_block_lines(image: &PixelImage, background: Color) -> Vec<Line<'static>> {
    let columns = image.columns as usize;
    let pixel = |row: usize, col: usize| -> Color {
        image
            .pixels
            .get(row * columns + col)
            .copied()
            .flatten()
            .unwrap_or(background)
    };
    (0..image.rows as usize)
        .step_by(2)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..columns)
                .map(|col| {
                    let bottom = if row + 1 < image.rows as usize {
                        pixel(row + 1, col)
                    } else {
                        background
                    };
                    Span::styled(
                        HALF_TOP.to_string(),
                        Style::default().fg(pixel(row, col)).bg(bottom),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clips() {
        let area = Rect::new(0, 0, 10, 6);
        assert_eq!(centered_rect(area, 4, 2), Rect::new(3, 2, 4, 2));
        assert_eq!(centered_rect(area, 40, 20), area);
    }

    #[test]
    fn test_half_block_pairs_rows() {
        let red = Color::Rgb(255, 0, 0);
        let image = PixelImage {
            columns: 2,
            rows: 3,
            pixels: vec![Some(red), None, None, Some(red), Some(red), Some(red)],
        };
        let lines = half_block_lines(&image, Color::Black);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].style.fg, Some(red));
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Black));
        assert_eq!(lines[0].spans[1].style.bg, Some(red));
        // Odd last row pads its bottom half with the background.
        assert_eq!(lines[1].spans[0].style.bg, Some(Color::Black));
    }
}
