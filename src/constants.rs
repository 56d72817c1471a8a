// Frame timing constants
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const MAX_FRAME_CATCHUP_MS: u64 = 100;
pub const INPUT_POLL_MS: u64 = 8;

// Default playing field (logical units, independent of terminal size)
pub const DEFAULT_FIELD_WIDTH: f64 = 800.0;
pub const DEFAULT_FIELD_HEIGHT: f64 = 500.0;
pub const MIN_FIELD_WIDTH: f64 = 200.0;
/// Smallest height that still fits the obstacle gap between its margins.
pub const MIN_FIELD_HEIGHT: f64 = OBSTACLE_GAP + 2.0 * OBSTACLE_MARGIN;

// Player constants
pub const PLAYER_START_X: f64 = 100.0;
pub const PLAYER_SIZE: f64 = 60.0;
pub const GRAVITY: f64 = 0.2;
pub const JUMP_IMPULSE: f64 = -6.5;
pub const JUMP_DAMPING: f64 = 0.85;
pub const MAX_FALL_SPEED: f64 = 5.0;
pub const JUMP_DEBOUNCE_MS: u64 = 50;

// Boundary tolerances
pub const TOP_OVERSHOOT: f64 = 5.0;
pub const BOTTOM_TOLERANCE: f64 = 5.0;

// Obstacle constants
pub const SCROLL_SPEED: f64 = 2.0;
pub const OBSTACLE_WIDTH: f64 = 30.0;
pub const OBSTACLE_GAP: f64 = 220.0;
pub const OBSTACLE_MARGIN: f64 = 50.0;
pub const OBSTACLE_GRACE_MS: u64 = 2000;

// Collectible constants
pub const COIN_RADIUS: f64 = 15.0;
pub const COIN_MARGIN: f64 = 50.0;

// Decoration constants
pub const CLOUD_MIN_SIZE: f64 = 30.0;
pub const CLOUD_SIZE_RANGE: f64 = 20.0;
pub const CLOUD_SPEED: f64 = 1.0;

// Per-frame spawn probabilities
pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.012;
pub const COIN_SPAWN_CHANCE: f64 = 0.015;
pub const CLOUD_SPAWN_CHANCE: f64 = 0.005;

// Scoring
pub const OBSTACLE_POINTS: u32 = 1;
pub const COIN_POINTS: u32 = 5;

// Collision
pub const HITBOX_PADDING: f64 = 5.0;

// Audio volumes
pub const MUSIC_VOLUME: f32 = 0.5;
pub const CUE_VOLUME: f32 = 1.0;
pub const GAME_OVER_VOLUME: f32 = 0.7;

// Persistence
pub const HIGH_SCORE_KEY: &str = "skydash.high_score";
pub const SCORES_FILE: &str = "scores.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "skydash.log";
