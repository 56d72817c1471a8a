//! Runtime configuration.
//!
//! Settings come from `~/.skydash/config.json` (every field optional) and are
//! then overridden by command-line flags.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::game::Field;
use crate::utils::build_info::VERSION_STRING;
use crate::utils::persistence::{load_json_at, load_json_or_default};

/// Skydash: flap through the fire, grab the coins.
#[derive(Parser, Debug, Default)]
#[command(version = VERSION_STRING)]
pub struct Cli {
    /// Image (PNG or JPEG) used as the player sprite.
    #[arg(long, value_name = "PATH")]
    pub sprite: Option<PathBuf>,

    /// Decorative image shown on the game-over screen.
    #[arg(long, value_name = "PATH")]
    pub game_over_image: Option<PathBuf>,

    /// Start with sound off.
    #[arg(long)]
    pub mute: bool,

    /// Logical field width.
    #[arg(long)]
    pub width: Option<f64>,

    /// Logical field height.
    #[arg(long)]
    pub height: Option<f64>,

    /// Log filter, e.g. `debug` or `skydash=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Read settings from this file instead of ~/.skydash/config.json.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Forget the stored best score and exit.
    #[arg(long)]
    pub reset_best: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f64,
    pub field_height: f64,
    pub frame_interval_ms: u64,
    pub sprite: Option<PathBuf>,
    pub game_over_image: Option<PathBuf>,
    pub sound_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            frame_interval_ms: FRAME_INTERVAL_MS,
            sprite: None,
            game_over_image: None,
            sound_enabled: true,
        }
    }
}

impl GameConfig {
    /// Load the config file named by the CLI (or the default one) and apply
    /// the CLI overrides on top.
    pub fn load(cli: &Cli) -> Self {
        let mut config: GameConfig = match &cli.config {
            Some(path) => load_json_at(path),
            None => load_json_or_default(CONFIG_FILE),
        };
        config.apply_cli(cli);
        config.sanitize();
        config
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(sprite) = &cli.sprite {
            self.sprite = Some(sprite.clone());
        }
        if let Some(image) = &cli.game_over_image {
            self.game_over_image = Some(image.clone());
        }
        if cli.mute {
            self.sound_enabled = false;
        }
        if let Some(width) = cli.width {
            self.field_width = width;
        }
        if let Some(height) = cli.height {
            self.field_height = height;
        }
    }

    /// Replace unusable values with the nearest workable ones.
    pub fn sanitize(&mut self) {
        if !self.field_width.is_finite() || self.field_width < MIN_FIELD_WIDTH {
            log::warn!(
                "Field width {} too small, using {}",
                self.field_width,
                MIN_FIELD_WIDTH
            );
            self.field_width = MIN_FIELD_WIDTH;
        }
        if !self.field_height.is_finite() || self.field_height < MIN_FIELD_HEIGHT {
            log::warn!(
                "Field height {} too small, using {}",
                self.field_height,
                MIN_FIELD_HEIGHT
            );
            self.field_height = MIN_FIELD_HEIGHT;
        }
        self.frame_interval_ms = self.frame_interval_ms.max(1);
    }

    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }
}
