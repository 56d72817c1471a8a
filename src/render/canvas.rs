//! `DrawSurface` backed by a ratatui canvas.
//!
//! The canvas uses half-block pixels, so every terminal cell holds two
//! vertically stacked pixels. Polygons are scan-converted at pixel centres,
//! and the canvas itself is laid out in pixel units so that pixel `(c, r)`
//! lands exactly on grid cell `(c, r)`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::Frame;

use super::surface::{DrawSurface, Point};
use crate::game::Field;

/// Canvas pixel layout: field units per pixel and pixel counts, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelGrid {
    pub step_x: f64,
    pub step_y: f64,
    pub columns: f64,
    pub rows: f64,
}

impl PixelGrid {
    /// Grid for drawing `field` into a terminal area of `area` cells.
    pub fn for_area(field: Field, area: Rect) -> Self {
        let columns = area.width.max(1) as f64;
        let rows = (area.height.max(1) as f64) * 2.0;
        Self {
            step_x: field.width / columns,
            step_y: field.height / rows,
            columns,
            rows,
        }
    }

    /// Canvas bounds in pixel units. ratatui maps `[0, res - 1]` onto its
    /// `res` grid cells, so integer coordinates hit cells exactly.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.columns - 1.0).max(1.0)]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, (self.rows - 1.0).max(1.0)]
    }

    /// Canvas position of a field point (y flipped, clamped to the bounds).
    pub fn to_canvas(&self, (x, y): Point) -> Point {
        let [_, right] = self.x_bounds();
        let [_, top] = self.y_bounds();
        let col = (x / self.step_x - 0.5).clamp(0.0, right);
        let row = (y / self.step_y - 0.5).clamp(0.0, top);
        (col, top - row)
    }
}

/// Pixel centres covered by `polygon` (even-odd rule).
pub fn rasterize(polygon: &[Point], grid: PixelGrid) -> Vec<Point> {
    covered_pixels(polygon, grid)
        .into_iter()
        .map(|(col, row)| ((col + 0.5) * grid.step_x, (row + 0.5) * grid.step_y))
        .collect()
}

/// Integral `(column, row)` indices of the pixels covered by `polygon`.
fn covered_pixels(polygon: &[Point], grid: PixelGrid) -> Vec<Point> {
    if polygon.len() < 3 || grid.step_x <= 0.0 || grid.step_y <= 0.0 {
        return Vec::new();
    }
    let (min_y, max_y) = polygon
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

    let mut covered = Vec::new();
    let mut row = (min_y / grid.step_y - 0.5).ceil();
    loop {
        let y = (row + 0.5) * grid.step_y;
        if y > max_y {
            break;
        }
        let mut crossings: Vec<f64> = Vec::new();
        for i in 0..polygon.len() {
            let (x1, y1) = polygon[i];
            let (x2, y2) = polygon[(i + 1) % polygon.len()];
            if (y1 <= y && y < y2) || (y2 <= y && y < y1) {
                crossings.push(x1 + (y - y1) * (x2 - x1) / (y2 - y1));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let mut col = (span[0] / grid.step_x - 0.5).ceil();
            loop {
                let x = (col + 0.5) * grid.step_x;
                if x > span[1] {
                    break;
                }
                covered.push((col, row));
                col += 1.0;
            }
        }
        row += 1.0;
    }
    covered
}

/// Adapter from `DrawSurface` calls onto a canvas paint context.
pub struct CanvasSurface<'c, 'a> {
    ctx: &'c mut Context<'a>,
    field: Field,
    grid: PixelGrid,
}

impl<'c, 'a> CanvasSurface<'c, 'a> {
    pub fn new(ctx: &'c mut Context<'a>, field: Field, grid: PixelGrid) -> Self {
        Self { ctx, field, grid }
    }
}

impl DrawSurface for CanvasSurface<'_, '_> {
    fn clear(&mut self, color: Color) {
        let (w, h) = (self.field.width, self.field.height);
        self.fill_polygon(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)], color);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        // Field rows grow downward, canvas rows grow upward.
        let top = self.grid.y_bounds()[1];
        let coords: Vec<Point> = covered_pixels(points, self.grid)
            .into_iter()
            .map(|(col, row)| (col, top - row))
            .collect();
        if !coords.is_empty() {
            self.ctx.draw(&Points {
                coords: &coords,
                color,
            });
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        let (x1, y1) = self.grid.to_canvas(from);
        let (x2, y2) = self.grid.to_canvas(to);
        self.ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }

    fn text(&mut self, at: Point, text: &str, color: Color) {
        let (x, y) = self.grid.to_canvas(at);
        self.ctx
            .print(x, y, Span::styled(text.to_string(), Style::default().fg(color)));
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.grid.step_x
    }
}

/// Render `paint` into `area` as a half-block canvas spanning the whole field.
pub fn render_field<F>(frame: &mut Frame, area: Rect, field: Field, paint: F)
where
    F: Fn(&mut dyn DrawSurface),
{
    let grid = PixelGrid::for_area(field, area);
    let canvas = Canvas::default()
        .marker(Marker::HalfBlock)
        .x_bounds(grid.x_bounds())
        .y_bounds(grid.y_bounds())
        .paint(move |ctx| {
            let mut surface = CanvasSurface::new(ctx, field, grid);
            paint(&mut surface);
        });
    frame.render_widget(canvas, area);
}
