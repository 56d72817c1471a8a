//! Drawing the playing field: sky, clouds, fire obstacles, coins, player.
//!
//! Everything goes through `Painter`, so the same code draws into the
//! terminal canvas and into a `RecordingSurface` in tests. Translucency is
//! approximated by mixing a colour toward the sky behind it.

use std::f64::consts::PI;

use ratatui::style::Color;

use super::sprite::Sprite;
use super::surface::{gradient_at, mix, Painter, Path};
use crate::game::{Collectible, Decoration, GameSession, Obstacle, Player};

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub const SKY_STOPS: [(f64, Color); 3] = [
    (0.0, hex(0x87CEEB)),
    (0.5, hex(0x98D8E8)),
    (1.0, hex(0xB0E0E6)),
];
pub const FIRE_STOPS: [(f64, Color); 4] = [
    (0.0, hex(0xFF4500)),
    (0.3, hex(0xFF6347)),
    (0.6, hex(0xFF8C00)),
    (1.0, hex(0xFFD700)),
];
pub const FIRE_CORE: Color = hex(0xFFFF00);
pub const SPARK: Color = hex(0xFFD700);
pub const COIN_RIM: Color = hex(0xFFA500);
pub const COIN_FACE: Color = hex(0xFFD700);
pub const COIN_EDGE: Color = hex(0xCC9900);
pub const PLACEHOLDER_FILL: Color = hex(0xFFD700);
pub const PLACEHOLDER_EDGE: Color = hex(0xCCAA00);
const WHITE: Color = hex(0xFFFFFF);
const BLACK: Color = hex(0x000000);

const SKY_BANDS: usize = 12;
const FIRE_BANDS: usize = 6;
const FLAME_LAYERS: usize = 3;
const SPARKS: usize = 5;

/// Sky colour behind field height `y`.
fn sky_at(session: &GameSession, y: f64) -> Color {
    gradient_at(&SKY_STOPS, y / session.field.height.max(1.0))
}

/// Draw one full frame of the field.
pub fn draw_scene(painter: &mut Painter<'_>, session: &GameSession, sprite: &Sprite, now_ms: u64) {
    draw_background(painter, session);
    for cloud in &session.decorations {
        draw_cloud(painter, session, cloud);
    }
    let time = now_ms as f64 / 100.0;
    for obstacle in &session.obstacles {
        draw_obstacle(painter, session, obstacle, time);
    }
    for coin in session.collectibles.iter().filter(|c| !c.collected) {
        draw_coin(painter, coin, now_ms);
    }
    draw_player(painter, &session.player, sprite);
}

pub fn draw_background(painter: &mut Painter<'_>, session: &GameSession) {
    let field = session.field;
    painter.clear(SKY_STOPS[0].1);
    painter.fill_rect_gradient(0.0, 0.0, field.width, field.height, &SKY_STOPS, SKY_BANDS);
}

/// Three overlapping puffs at 80% white.
pub fn draw_cloud(painter: &mut Painter<'_>, session: &GameSession, cloud: &Decoration) {
    let color = mix(sky_at(session, cloud.y), WHITE, 0.8);
    let s = cloud.size;
    painter.fill_circle(cloud.x, cloud.y, s, color);
    painter.fill_circle(cloud.x + s * 0.6, cloud.y, s * 0.8, color);
    painter.fill_circle(cloud.x + s * 1.2, cloud.y, s, color);
}

/// Top fire hangs from the ceiling; the bottom one is the same fire mirrored
/// to rise from the floor, so both tips meet the gap.
pub fn draw_obstacle(painter: &mut Painter<'_>, session: &GameSession, obstacle: &Obstacle, time: f64) {
    let backdrop = sky_at(session, session.field.height / 2.0);
    draw_fire(painter, backdrop, obstacle.x, 0.0, obstacle.width, obstacle.top_height, time);

    painter.save();
    painter.translate(obstacle.x, session.field.height);
    painter.scale(1.0, -1.0);
    draw_fire(painter, backdrop, 0.0, 0.0, obstacle.width, obstacle.bottom_height, time);
    painter.restore();
}

fn flame_path(x: f64, y: f64, width: f64, height: f64, time: f64, layer: f64) -> Path {
    let offset = (time + layer).sin() * 3.0;
    let flame_width = width + (time * 2.0 + layer).sin() * 5.0;
    let sway = (time + layer).sin() * 3.0;
    Path::new()
        .move_to(x + offset, y)
        .quad_to(x - 5.0 + sway, y + height * 0.3, x + offset, y + height * 0.5)
        .quad_to(
            x + offset,
            y + height * 0.7,
            x + flame_width * 0.3 + offset,
            y + height,
        )
        .line_to(x + flame_width * 0.7 + offset, y + height)
        .quad_to(
            x + flame_width + offset,
            y + height * 0.7,
            x + flame_width + offset,
            y + height * 0.5,
        )
        .quad_to(
            x + flame_width + 5.0 + sway,
            y + height * 0.3,
            x + flame_width + offset,
            y,
        )
}

/// Animated fire filling `(x, y, width, height)` in local coordinates.
pub fn draw_fire(
    painter: &mut Painter<'_>,
    backdrop: Color,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    time: f64,
) {
    // Faintest layer first so the strongest one stays visible.
    for layer in (0..FLAME_LAYERS).rev() {
        let alpha = 0.7 - layer as f64 * 0.2;
        let stops: Vec<(f64, Color)> = FIRE_STOPS
            .iter()
            .map(|&(offset, color)| (offset, mix(backdrop, color, alpha)))
            .collect();
        let path = flame_path(x, y, width, height, time, layer as f64);
        painter.fill_path_gradient(&path, y, y + height, &stops, FIRE_BANDS);
    }

    let flame = gradient_at(&FIRE_STOPS, 0.3);
    painter.fill_ellipse(
        x + width / 2.0,
        y + height * 0.3,
        width * 0.2,
        height * 0.2,
        mix(flame, FIRE_CORE, 0.9),
    );

    for i in 0..SPARKS {
        let i = i as f64;
        let spark_x = x + width / 2.0 + (time * 3.0 + i).sin() * width * 0.3;
        let spark_y = y + (time * 2.0 + i).sin() * height * 0.2;
        painter.fill_circle(spark_x, spark_y, 2.0, mix(flame, SPARK, 0.6));
    }
}

/// Spinning gold coin.
pub fn draw_coin(painter: &mut Painter<'_>, coin: &Collectible, now_ms: u64) {
    let degrees = (now_ms as f64 / 10.0) % 360.0;
    let r = coin.radius;

    painter.save();
    painter.translate(coin.x, coin.y);
    painter.rotate(degrees * PI / 180.0);

    painter.fill_circle(0.0, 0.0, r, COIN_RIM);
    painter.fill_circle(0.0, 0.0, r * 0.85, COIN_FACE);
    painter.stroke_circle(0.0, 0.0, r, COIN_EDGE);
    painter.fill_circle(0.0, 0.0, r * 0.7, COIN_RIM);
    painter.fill_circle(-r * 0.3, -r * 0.3, r * 0.3, mix(COIN_RIM, WHITE, 0.8));
    painter.text_centered(0.0, 0.0, "$", BLACK);

    painter.restore();
}

/// The sprite tilted with velocity, or a labelled placeholder disc.
pub fn draw_player(painter: &mut Painter<'_>, player: &Player, sprite: &Sprite) {
    let cx = player.x + player.width / 2.0;
    let cy = player.y + player.height / 2.0;

    painter.save();
    match sprite {
        Sprite::Image(image) => {
            painter.translate(cx, cy);
            painter.rotate(player.tilt());
            image.draw(
                painter,
                -player.width / 2.0,
                -player.height / 2.0,
                player.width,
                player.height,
            );
        }
        Sprite::Placeholder => {
            let r = player.width / 2.0;
            painter.fill_circle(cx, cy, r, PLACEHOLDER_FILL);
            painter.stroke_circle(cx, cy, r, PLACEHOLDER_EDGE);
            painter.text_centered(cx, cy, "Image?", BLACK);
        }
    }
    painter.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Field;
    use crate::render::sprite::PixelImage;
    use crate::render::surface::{DrawOp, RecordingSurface};

    fn session() -> GameSession {
        GameSession::new(Field::default(), 0, true)
    }

    fn polygon_points(surface: &RecordingSurface) -> Vec<(f64, f64)> {
        surface
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Polygon(points, _) => Some(points.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[test]
    fn test_empty_scene_draws_sky_and_placeholder() {
        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(&mut surface);
        draw_scene(&mut painter, &session(), &Sprite::Placeholder, 0);

        assert_eq!(surface.ops[0], DrawOp::Clear(SKY_STOPS[0].1));
        assert!(surface.polygons_with(PLACEHOLDER_FILL) >= 1);
        assert_eq!(surface.texts(), vec!["Image?"]);
    }

    #[test]
    fn test_coin_glyph_and_collected_coins_hidden() {
        let mut s = session();
        s.collectibles.push(Collectible::new(300.0, 200.0));
        let mut taken = Collectible::new(400.0, 200.0);
        taken.collected = true;
        s.collectibles.push(taken);

        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(&mut surface);
        draw_scene(&mut painter, &s, &Sprite::Placeholder, 1234);

        let coins = surface.texts().iter().filter(|t| **t == "$").count();
        assert_eq!(coins, 1);
    }

    #[test]
    fn test_fire_stays_near_its_column() {
        let s = session();
        let obstacle = Obstacle::new(400.0, 100.0, s.field.height);
        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(&mut surface);
        draw_obstacle(&mut painter, &s, &obstacle, 17.3);

        let points = polygon_points(&surface);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.0 >= 390.0 && p.0 <= 445.0));
        // The mirrored bottom fire reaches down to the floor, and no flame
        // reaches into the gap.
        assert!(points.iter().any(|p| p.1 > obstacle.bottom_y + 100.0));
        assert!(points
            .iter()
            .all(|p| p.1 <= obstacle.top_height + 1e-6 || p.1 >= obstacle.bottom_y - 1e-6));
    }

    #[test]
    fn test_cloud_is_three_puffs() {
        let s = session();
        let cloud = Decoration {
            x: 500.0,
            y: 50.0,
            size: 40.0,
            speed: 1.0,
        };
        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(&mut surface);
        draw_cloud(&mut painter, &s, &cloud);
        assert_eq!(surface.ops.len(), 3);
    }

    #[test]
    fn test_image_sprite_is_centred_on_player() {
        let s = session();
        let image = PixelImage {
            columns: 1,
            rows: 1,
            pixels: vec![Some(Color::Rgb(1, 2, 3))],
        };
        let mut surface = RecordingSurface::default();
        let mut painter = Painter::new(&mut surface);
        draw_player(&mut painter, &s.player, &Sprite::Image(image));

        // Player at rest has no tilt, so the single pixel covers its box.
        match &surface.ops[..] {
            [DrawOp::Polygon(points, _)] => {
                assert!((points[0].0 - s.player.x).abs() < 1e-9);
                assert!((points[0].1 - s.player.y).abs() < 1e-9);
                assert!((points[2].0 - (s.player.x + s.player.width)).abs() < 1e-9);
            }
            ops => panic!("unexpected ops {:?}", ops),
        }
    }
}
