//! Game logic: run lifecycle, physics, spawning, collisions, scoring.
//!
//! Every function here is pure session manipulation. Side effects such as
//! audio cues and persistence are driven by the events these functions return.

use super::types::*;
use crate::constants::*;
use rand::Rng;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndCause {
    /// Fell past the bottom tolerance.
    Boundary,
    /// Touched an obstacle segment.
    Obstacle,
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cause: RunEndCause,
    pub final_score: u32,
    pub previous_best: u32,
    /// True when `final_score` replaced the previous best.
    pub new_best: bool,
}

/// Something noteworthy that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    ObstaclePassed,
    CoinCollected,
    RunEnded(RunSummary),
}

/// Begin a new run. Ignored (returns false) while a run is in progress.
pub fn start_run(session: &mut GameSession, now_ms: u64) -> bool {
    if session.is_playing() {
        return false;
    }

    session.obstacles.clear();
    session.collectibles.clear();
    session.decorations.clear();
    session.player.reset(session.field);
    session.score = 0;
    session.frame_count = 0;
    session.run_started_ms = now_ms;
    session.mode = RunMode::Playing;
    true
}

/// Apply a jump if a run is active and the debounce interval has passed.
///
/// The impulse partially overrides the current velocity instead of adding to
/// it, so repeated jumps can never push the player upward faster than the
/// impulse itself. Returns whether the jump was accepted.
pub fn try_jump(session: &mut GameSession, now_ms: u64) -> bool {
    if !session.is_playing() {
        return false;
    }
    if let Some(last) = session.last_jump_ms {
        if now_ms.saturating_sub(last) < JUMP_DEBOUNCE_MS {
            return false;
        }
    }
    session.last_jump_ms = Some(now_ms);

    let player = &mut session.player;
    player.velocity =
        (player.velocity + player.jump_impulse * JUMP_DAMPING).max(player.jump_impulse);
    true
}

/// Flip the sound flag and return the new value.
pub fn toggle_sound(session: &mut GameSession) -> bool {
    session.sound_enabled = !session.sound_enabled;
    session.sound_enabled
}

/// Finish the current run and fold its score into the best score.
pub fn end_run(session: &mut GameSession, cause: RunEndCause) -> RunSummary {
    session.mode = RunMode::Ended;

    let previous_best = session.best_score;
    let new_best = session.score > previous_best;
    if new_best {
        session.best_score = session.score;
    }

    RunSummary {
        cause,
        final_score: session.score,
        previous_best,
        new_best,
    }
}

/// Advance the session by exactly one frame.
///
/// Does nothing unless a run is active. Obstacles are fully processed before
/// coins; a run-ending collision returns immediately and skips the rest of the
/// frame.
pub fn step_frame<R: Rng>(session: &mut GameSession, now_ms: u64, rng: &mut R) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    if !session.is_playing() {
        return events;
    }
    session.frame_count += 1;

    if !integrate_player(session) {
        events.push(FrameEvent::RunEnded(end_run(session, RunEndCause::Boundary)));
        return events;
    }

    spawn_entities(session, now_ms, rng);

    if advance_obstacles(session, &mut events) {
        events.push(FrameEvent::RunEnded(end_run(session, RunEndCause::Obstacle)));
        return events;
    }
    advance_collectibles(session, &mut events);
    advance_decorations(session);

    events
}

/// Gravity, velocity cap, and boundary handling. Returns false when the
/// player fell out of the field.
fn integrate_player(session: &mut GameSession) -> bool {
    let field = session.field;
    let player = &mut session.player;

    player.velocity = (player.velocity + player.gravity).min(player.max_fall_speed);
    player.y += player.velocity;

    if player.y < -TOP_OVERSHOOT {
        player.y = -TOP_OVERSHOOT;
        player.velocity = 0.0;
    }

    player.y + player.height <= field.height + BOTTOM_TOLERANCE
}

/// Independent per-frame spawn rolls for each entity kind.
fn spawn_entities<R: Rng>(session: &mut GameSession, now_ms: u64, rng: &mut R) {
    let field = session.field;
    let elapsed = now_ms.saturating_sub(session.run_started_ms);

    if elapsed > OBSTACLE_GRACE_MS && rng.gen_bool(OBSTACLE_SPAWN_CHANCE) {
        session.obstacles.push(Obstacle::spawn(field, rng));
    }
    if rng.gen_bool(COIN_SPAWN_CHANCE) {
        session.collectibles.push(Collectible::spawn(field, rng));
    }
    if rng.gen_bool(CLOUD_SPAWN_CHANCE) {
        session.decorations.push(Decoration::spawn(field, rng));
    }
}

/// Scroll obstacles, test collisions, and retire passed ones.
/// Returns true on a collision.
fn advance_obstacles(session: &mut GameSession, events: &mut Vec<FrameEvent>) -> bool {
    for obstacle in &mut session.obstacles {
        obstacle.x -= SCROLL_SPEED;
    }

    let player = session.player.bounds();
    let hit = session.obstacles.iter().any(|o| {
        player.overlaps_padded(&o.top_bounds(), HITBOX_PADDING)
            || player.overlaps_padded(&o.bottom_bounds(), HITBOX_PADDING)
    });
    if hit {
        return true;
    }

    let before = session.obstacles.len();
    session.obstacles.retain(|o| !o.is_off_screen());
    let passed = (before - session.obstacles.len()) as u32;
    for _ in 0..passed {
        session.score += OBSTACLE_POINTS;
        events.push(FrameEvent::ObstaclePassed);
    }
    false
}

/// Scroll coins, collect touched ones, and drop collected or passed coins.
fn advance_collectibles(session: &mut GameSession, events: &mut Vec<FrameEvent>) {
    let player = session.player.bounds();

    for coin in &mut session.collectibles {
        coin.x -= SCROLL_SPEED;

        if !coin.collected && player.overlaps_padded(&coin.bounds(), HITBOX_PADDING) {
            coin.collected = true;
            session.score += COIN_POINTS;
            events.push(FrameEvent::CoinCollected);
        }
    }

    session
        .collectibles
        .retain(|c| !c.collected && !c.is_off_screen());
}

fn advance_decorations(session: &mut GameSession) {
    for cloud in &mut session.decorations {
        cloud.x -= cloud.speed;
    }
    session.decorations.retain(|c| !c.is_off_screen());
}
