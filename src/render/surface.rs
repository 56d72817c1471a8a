//! Drawing capability and the transform-aware painter layered on top of it.
//!
//! A `DrawSurface` only understands field-space polygons, lines and text.
//! `Painter` adds what a 2D canvas API offers: save/restore of transform
//! state, translate/rotate/scale, curved paths, circles, and gradients.

use ratatui::style::Color;

pub type Point = (f64, f64);

/// Primitive drawing operations in field coordinates (origin top-left, y down).
pub trait DrawSurface {
    /// Fill the whole surface.
    fn clear(&mut self, color: Color);
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    fn stroke_line(&mut self, from: Point, to: Point, color: Color);
    /// Draw text with its left edge at `at`.
    fn text(&mut self, at: Point, text: &str, color: Color);
    /// Width of `text` in field units.
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * 8.0
    }
}

/// 2D affine transform, laid out like a canvas matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn apply(&self, (x, y): Point) -> Point {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.e += self.a * tx + self.c * ty;
        self.f += self.b * tx + self.d * ty;
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.a *= sx;
        self.b *= sx;
        self.c *= sy;
        self.d *= sy;
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Segments used to approximate a full circle.
const CIRCLE_SEGMENTS: usize = 24;
/// Segments used to approximate one quadratic curve.
const CURVE_SEGMENTS: usize = 8;

/// A polygon outline built from straight and quadratic segments.
#[derive(Debug, Clone, Default)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.points.clear();
        self.points.push((x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.points.push((x, y));
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        let (x0, y0) = self.points.last().copied().unwrap_or((cx, cy));
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f64 / CURVE_SEGMENTS as f64;
            let u = 1.0 - t;
            self.points.push((
                u * u * x0 + 2.0 * u * t * cx + t * t * x,
                u * u * y0 + 2.0 * u * t * cy + t * t * y,
            ));
        }
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Interpolate between two RGB colours. Non-RGB colours snap at the midpoint.
pub fn mix(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

/// Colour at position `t` along gradient `stops` (sorted by offset).
pub fn gradient_at(stops: &[(f64, Color)], t: f64) -> Color {
    let Some(&(first_offset, first)) = stops.first() else {
        return Color::Reset;
    };
    if t <= first_offset {
        return first;
    }
    for pair in stops.windows(2) {
        let (o1, c1) = pair[0];
        let (o2, c2) = pair[1];
        if t <= o2 {
            let span = (o2 - o1).max(f64::EPSILON);
            return mix(c1, c2, (t - o1) / span);
        }
    }
    stops[stops.len() - 1].1
}

/// Keep the part of `poly` with `y0 <= y <= y1` (Sutherland-Hodgman).
fn clip_to_band(poly: &[Point], y0: f64, y1: f64) -> Vec<Point> {
    let clip = |input: &[Point], keep: &dyn Fn(f64) -> bool, edge: f64| -> Vec<Point> {
        let mut out = Vec::with_capacity(input.len() + 2);
        for (i, &cur) in input.iter().enumerate() {
            let prev = input[(i + input.len() - 1) % input.len()];
            let cross = |p: Point, q: Point| {
                let t = (edge - p.1) / (q.1 - p.1);
                (p.0 + (q.0 - p.0) * t, edge)
            };
            match (keep(prev.1), keep(cur.1)) {
                (true, true) => out.push(cur),
                (true, false) => out.push(cross(prev, cur)),
                (false, true) => {
                    out.push(cross(prev, cur));
                    out.push(cur);
                }
                (false, false) => {}
            }
        }
        out
    };
    if poly.len() < 3 {
        return Vec::new();
    }
    let upper = clip(poly, &|y| y >= y0, y0);
    if upper.len() < 3 {
        return Vec::new();
    }
    clip(&upper, &|y| y <= y1, y1)
}

/// Canvas-style drawing front-end over any `DrawSurface`.
pub struct Painter<'a> {
    surface: &'a mut dyn DrawSurface,
    transform: Transform,
    saved: Vec<Transform>,
}

impl<'a> Painter<'a> {
    pub fn new(surface: &'a mut dyn DrawSurface) -> Self {
        Self {
            surface,
            transform: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn save(&mut self) {
        self.saved.push(self.transform);
    }

    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.transform.translate(tx, ty);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform.scale(sx, sy);
    }

    pub fn clear(&mut self, color: Color) {
        self.surface.clear(color);
    }

    fn fill_local(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let mapped: Vec<Point> = points.iter().map(|&p| self.transform.apply(p)).collect();
        self.surface.fill_polygon(&mapped, color);
    }

    pub fn fill_path(&mut self, path: &Path, color: Color) {
        self.fill_local(path.points(), color);
    }

    /// Fill `path` with a vertical gradient running from `top` to `bottom`
    /// (local coordinates), approximated with `bands` solid stripes.
    pub fn fill_path_gradient(
        &mut self,
        path: &Path,
        top: f64,
        bottom: f64,
        stops: &[(f64, Color)],
        bands: usize,
    ) {
        let bands = bands.max(1);
        let (lo, hi) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        let height = hi - lo;
        if height <= 0.0 {
            return;
        }
        for i in 0..bands {
            let y0 = lo + height * i as f64 / bands as f64;
            let y1 = lo + height * (i + 1) as f64 / bands as f64;
            let piece = clip_to_band(path.points(), y0, y1);
            let mid = ((y0 + y1) / 2.0 - top) / (bottom - top);
            self.fill_local(&piece, gradient_at(stops, mid));
        }
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.fill_local(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)], color);
    }

    pub fn fill_rect_gradient(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        stops: &[(f64, Color)],
        bands: usize,
    ) {
        let bands = bands.max(1);
        for i in 0..bands {
            let y0 = y + h * i as f64 / bands as f64;
            let band_h = h / bands as f64;
            let mid = (i as f64 + 0.5) / bands as f64;
            self.fill_rect(x, y0, w, band_h, gradient_at(stops, mid));
        }
    }

    fn ellipse_points(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<Point> {
        (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = i as f64 / CIRCLE_SEGMENTS as f64 * std::f64::consts::TAU;
                (cx + rx * angle.cos(), cy + ry * angle.sin())
            })
            .collect()
    }

    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Color) {
        let points = Self::ellipse_points(cx, cy, rx, ry);
        self.fill_local(&points, color);
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        self.fill_ellipse(cx, cy, r, r, color);
    }

    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        let points = Self::ellipse_points(cx, cy, r, r);
        for i in 0..points.len() {
            let from = points[i];
            let to = points[(i + 1) % points.len()];
            self.line(from.0, from.1, to.0, to.1, color);
        }
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        let from = self.transform.apply((x1, y1));
        let to = self.transform.apply((x2, y2));
        self.surface.stroke_line(from, to, color);
    }

    /// Text is positioned through the transform but never rotated.
    pub fn text(&mut self, x: f64, y: f64, text: &str, color: Color) {
        let at = self.transform.apply((x, y));
        self.surface.text(at, text, color);
    }

    pub fn text_centered(&mut self, x: f64, y: f64, text: &str, color: Color) {
        let (cx, cy) = self.transform.apply((x, y));
        let width = self.surface.text_width(text);
        self.surface.text((cx - width / 2.0, cy), text, color);
    }
}

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Polygon(Vec<Point>, Color),
    Line(Point, Point, Color),
    Text(Point, String, Color),
}

/// Surface that records every call instead of drawing. Used for headless checks.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(_, text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn polygons_with(&self, color: Color) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Polygon(_, c) if *c == color))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.ops.push(DrawOp::Polygon(points.to_vec(), color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        self.ops.push(DrawOp::Line(from, to, color));
    }

    fn text(&mut self, at: Point, text: &str, color: Color) {
        self.ops.push(DrawOp::Text(at, text.to_string(), color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_translate_then_rotate() {
        let mut t = Transform::IDENTITY;
        t.translate(10.0, 20.0);
        t.rotate(std::f64::consts::FRAC_PI_2);
        // A quarter turn maps +x onto +y (y grows downward).
        assert!(close(t.apply((1.0, 0.0)), (10.0, 21.0)));
    }

    #[test]
    fn test_scale_flips_vertically() {
        let mut t = Transform::IDENTITY;
        t.translate(0.0, 100.0);
        t.scale(1.0, -1.0);
        assert!(close(t.apply((5.0, 30.0)), (5.0, 70.0)));
    }

    #[test]
    fn test_save_restore() {
        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(&mut surface);
        painter.save();
        painter.translate(50.0, 50.0);
        painter.restore();
        painter.text(1.0, 2.0, "hi", Color::White);
        assert_eq!(
            surface.ops,
            vec![DrawOp::Text((1.0, 2.0), "hi".to_string(), Color::White)]
        );
    }

    #[test]
    fn test_gradient_at() {
        let stops = [(0.0, Color::Rgb(0, 0, 0)), (1.0, Color::Rgb(200, 100, 0))];
        assert_eq!(gradient_at(&stops, -1.0), Color::Rgb(0, 0, 0));
        assert_eq!(gradient_at(&stops, 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(gradient_at(&stops, 2.0), Color::Rgb(200, 100, 0));
    }

    #[test]
    fn test_clip_to_band() {
        let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let clipped = clip_to_band(&square, 2.0, 5.0);
        assert!(!clipped.is_empty());
        assert!(clipped.iter().all(|p| p.1 >= 2.0 - 1e-9 && p.1 <= 5.0 + 1e-9));

        assert!(clip_to_band(&square, 20.0, 30.0).is_empty());
    }

    #[test]
    fn test_quad_to_ends_on_target() {
        let path = Path::new().move_to(0.0, 0.0).quad_to(5.0, 10.0, 10.0, 0.0);
        assert_eq!(path.points().len(), 1 + CURVE_SEGMENTS);
        assert!(close(*path.points().last().unwrap(), (10.0, 0.0)));
    }

    #[test]
    fn test_gradient_rect_uses_bands() {
        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(&mut surface);
        let stops = [(0.0, Color::Rgb(0, 0, 0)), (1.0, Color::Rgb(255, 255, 255))];
        painter.fill_rect_gradient(0.0, 0.0, 10.0, 10.0, &stops, 4);
        assert_eq!(surface.ops.len(), 4);
    }
}
