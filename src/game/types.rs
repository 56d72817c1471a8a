//! Skydash data structures.
//!
//! The player, the three kinds of scrolling entity, and the session that owns
//! all of them. Coordinates are logical field units with the origin at the
//! top-left corner and y growing downward.

use crate::constants::*;
use rand::Rng;

/// Which phase of a run the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Before the first run. Only the start screen is interactive.
    Idle,
    /// Frames are being stepped.
    Playing,
    /// The last run is over; waiting for a restart.
    Ended,
}

/// Logical size of the playing field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Field {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Overlap test with both boxes shrunk inward by `padding` on every side.
    pub fn overlaps_padded(&self, other: &Aabb, padding: f64) -> bool {
        self.x + padding < other.x + other.width - padding
            && self.x + self.width - padding > other.x + padding
            && self.y + padding < other.y + other.height - padding
            && self.y + self.height - padding > other.y + padding
    }
}

/// The falling sprite the player steers.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in units/frame (positive = downward).
    pub velocity: f64,
    pub gravity: f64,
    pub jump_impulse: f64,
    pub max_fall_speed: f64,
}

impl Player {
    pub fn new(field: Field) -> Self {
        Self {
            x: PLAYER_START_X,
            y: field.height / 2.0,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            velocity: 0.0,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_fall_speed: MAX_FALL_SPEED,
        }
    }

    /// Put the player back at the start position, at rest.
    pub fn reset(&mut self, field: Field) {
        self.x = PLAYER_START_X;
        self.y = field.height / 2.0;
        self.velocity = 0.0;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Sprite rotation in radians, proportional to velocity and clamped.
    pub fn tilt(&self) -> f64 {
        (self.velocity * 0.08).clamp(-0.25, 0.25)
    }
}

/// A top and bottom segment separated by a passable gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub width: f64,
    pub top_height: f64,
    pub bottom_y: f64,
    pub bottom_height: f64,
}

impl Obstacle {
    /// Build an obstacle whose gap starts at `top_height`.
    pub fn new(x: f64, top_height: f64, field_height: f64) -> Self {
        let bottom_y = top_height + OBSTACLE_GAP;
        Self {
            x,
            width: OBSTACLE_WIDTH,
            top_height,
            bottom_y,
            bottom_height: field_height - bottom_y,
        }
    }

    /// Spawn at the right edge with a random gap position.
    pub fn spawn<R: Rng>(field: Field, rng: &mut R) -> Self {
        let span = (field.height - OBSTACLE_GAP - 2.0 * OBSTACLE_MARGIN).max(0.0);
        let top_height = rng.gen::<f64>() * span + OBSTACLE_MARGIN;
        Self::new(field.width, top_height, field.height)
    }

    pub fn top_bounds(&self) -> Aabb {
        Aabb::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_bounds(&self) -> Aabb {
        Aabb::new(self.x, self.bottom_y, self.width, self.bottom_height)
    }

    /// True once the trailing edge has reached the left boundary.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width <= 0.0
    }
}

/// A bonus coin.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    pub radius: f64,
    pub collected: bool,
}

impl Collectible {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: COIN_RADIUS,
            collected: false,
        }
    }

    pub fn spawn<R: Rng>(field: Field, rng: &mut R) -> Self {
        let span = (field.height - 2.0 * COIN_MARGIN).max(0.0);
        Self::new(field.width, rng.gen::<f64>() * span + COIN_MARGIN)
    }

    /// Square box around the coin's circular extent.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.radius <= 0.0
    }
}

/// A background cloud. Never collides with anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
}

impl Decoration {
    /// Spawn at the right edge somewhere in the upper half of the field.
    pub fn spawn<R: Rng>(field: Field, rng: &mut R) -> Self {
        Self {
            x: field.width,
            y: rng.gen::<f64>() * field.height * 0.5,
            size: CLOUD_MIN_SIZE + rng.gen::<f64>() * CLOUD_SIZE_RANGE,
            speed: CLOUD_SPEED,
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.size * 2.0 <= 0.0
    }
}

/// Everything that changes while the game runs.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub field: Field,
    pub mode: RunMode,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub decorations: Vec<Decoration>,

    // Scoring
    /// Score of the current (or most recent) run.
    pub score: u32,
    /// Best score across all runs, mirrored from the persistent store.
    pub best_score: u32,

    pub sound_enabled: bool,

    // Timing (wall-clock milliseconds)
    pub run_started_ms: u64,
    /// Time of the last accepted jump. Kept across runs.
    pub last_jump_ms: Option<u64>,
    /// Frames stepped in the current run.
    pub frame_count: u64,
}

impl GameSession {
    pub fn new(field: Field, best_score: u32, sound_enabled: bool) -> Self {
        Self {
            field,
            mode: RunMode::Idle,
            player: Player::new(field),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            decorations: Vec::new(),
            score: 0,
            best_score,
            sound_enabled,
            run_started_ms: 0,
            last_jump_ms: None,
            frame_count: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.mode == RunMode::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(Field::default(), 12, true);
        assert_eq!(session.mode, RunMode::Idle);
        assert_eq!(session.score, 0);
        assert_eq!(session.best_score, 12);
        assert!(session.obstacles.is_empty());
        assert!(session.collectibles.is_empty());
        assert!(session.decorations.is_empty());
        assert!((session.player.y - 250.0).abs() < f64::EPSILON);
        assert!((session.player.x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_padded_overlap() {
        let a = Aabb::new(0.0, 0.0, 20.0, 20.0);
        // Raw boxes overlap by 8 units, padded boxes do not (5 + 5 > 8).
        let b = Aabb::new(12.0, 0.0, 20.0, 20.0);
        assert!(!a.overlaps_padded(&b, HITBOX_PADDING));
        assert!(a.overlaps_padded(&b, 0.0));

        // 11 units of overlap survives the padding.
        let c = Aabb::new(9.0, 0.0, 20.0, 20.0);
        assert!(a.overlaps_padded(&c, HITBOX_PADDING));
    }

    #[test]
    fn test_obstacle_geometry() {
        let obstacle = Obstacle::new(800.0, 120.0, 500.0);
        assert!((obstacle.bottom_y - 340.0).abs() < f64::EPSILON);
        assert!((obstacle.bottom_height - 160.0).abs() < f64::EPSILON);
        assert_eq!(obstacle.top_bounds(), Aabb::new(800.0, 0.0, 30.0, 120.0));
        assert_eq!(obstacle.bottom_bounds(), Aabb::new(800.0, 340.0, 30.0, 160.0));
    }

    #[test]
    fn test_spawned_obstacles_respect_gap_and_margins() {
        let field = Field::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let o = Obstacle::spawn(field, &mut rng);
            assert!((o.x - field.width).abs() < f64::EPSILON);
            assert!((o.bottom_y - (o.top_height + OBSTACLE_GAP)).abs() < 1e-9);
            assert!((o.bottom_height - (field.height - o.bottom_y)).abs() < 1e-9);
            assert!(o.top_height >= OBSTACLE_MARGIN);
            assert!(o.bottom_height >= OBSTACLE_MARGIN);
        }
    }

    #[test]
    fn test_spawned_coins_enter_at_right_edge_inside_margins() {
        let field = Field::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let (mut lowest, mut highest) = (f64::MAX, f64::MIN);
        for _ in 0..500 {
            let coin = Collectible::spawn(field, &mut rng);
            assert!((coin.x - field.width).abs() < f64::EPSILON);
            assert!(coin.y >= COIN_MARGIN && coin.y < field.height - COIN_MARGIN);
            assert!((coin.radius - COIN_RADIUS).abs() < f64::EPSILON);
            assert!(!coin.collected);
            lowest = lowest.min(coin.y);
            highest = highest.max(coin.y);
        }
        // 500 draws should spread over most of the 50..450 band.
        assert!(lowest < COIN_MARGIN + 40.0);
        assert!(highest > field.height - COIN_MARGIN - 40.0);
    }

    #[test]
    fn test_spawned_clouds_stay_in_upper_half() {
        let field = Field::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let cloud = Decoration::spawn(field, &mut rng);
            assert!((cloud.x - field.width).abs() < f64::EPSILON);
            assert!((cloud.speed - CLOUD_SPEED).abs() < f64::EPSILON);
            assert!(cloud.y >= 0.0 && cloud.y < field.height * 0.5);
            assert!(cloud.size >= CLOUD_MIN_SIZE && cloud.size < CLOUD_MIN_SIZE + CLOUD_SIZE_RANGE);
        }
    }

    #[test]
    fn test_coin_bounds_cover_circle() {
        let coin = Collectible::new(200.0, 100.0);
        assert_eq!(coin.bounds(), Aabb::new(185.0, 85.0, 30.0, 30.0));
    }

    #[test]
    fn test_off_screen_edges() {
        let mut o = Obstacle::new(-29.0, 100.0, 500.0);
        assert!(!o.is_off_screen());
        o.x = -30.0;
        assert!(o.is_off_screen());
    }

    #[test]
    fn test_player_tilt_clamped() {
        let mut player = Player::new(Field::default());
        player.velocity = 5.0;
        assert!((player.tilt() - 0.25).abs() < f64::EPSILON);
        player.velocity = -6.5;
        assert!((player.tilt() + 0.25).abs() < f64::EPSILON);
        player.velocity = 1.0;
        assert!((player.tilt() - 0.08).abs() < 1e-12);
    }
}
