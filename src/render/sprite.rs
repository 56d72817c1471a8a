//! Player sprite and decorative images.
//!
//! Images are decoded once with the `image` crate and downsampled to a small
//! pixel grid that the painter draws as tiny squares.

use std::path::Path;

use image::imageops::FilterType;
use image::{GenericImageView, RgbaImage};
use ratatui::style::Color;

use super::surface::Painter;

/// Side length of the downsampled sprite grid.
pub const SPRITE_RESOLUTION: u32 = 16;
/// Side length of the game-over picture grid.
pub const GAME_OVER_ART_RESOLUTION: u32 = 24;

/// A decoded image reduced to a grid of opaque pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    pub columns: u32,
    pub rows: u32,
    /// Row-major; `None` for transparent pixels.
    pub pixels: Vec<Option<Color>>,
}

impl PixelImage {
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let (columns, rows) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                (a >= 128).then_some(Color::Rgb(r, g, b))
            })
            .collect();
        Self {
            columns,
            rows,
            pixels,
        }
    }

    /// Decode `path` and shrink it to `resolution`×`resolution`.
    pub fn load(path: &Path, resolution: u32) -> image::ImageResult<Self> {
        let decoded = image::open(path)?;
        let (w, h) = decoded.dimensions();
        log::debug!("Decoded {} ({}x{})", path.display(), w, h);
        let small = decoded
            .resize_exact(resolution, resolution, FilterType::Triangle)
            .to_rgba8();
        Ok(Self::from_rgba(&small))
    }

    /// Draw the image filling the local box `(x, y, width, height)`.
    pub fn draw(&self, painter: &mut Painter<'_>, x: f64, y: f64, width: f64, height: f64) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }
        let cell_w = width / self.columns as f64;
        let cell_h = height / self.rows as f64;
        for (i, pixel) in self.pixels.iter().enumerate() {
            let Some(color) = pixel else { continue };
            let col = (i as u32 % self.columns) as f64;
            let row = (i as u32 / self.columns) as f64;
            painter.fill_rect(x + col * cell_w, y + row * cell_h, cell_w, cell_h, *color);
        }
    }
}

/// The player's look: an image when one loaded, otherwise a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Image(PixelImage),
    Placeholder,
}

impl Sprite {
    /// Load the configured sprite. Any failure degrades to the placeholder.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Sprite::Placeholder;
        };
        match PixelImage::load(path, SPRITE_RESOLUTION) {
            Ok(image) => Sprite::Image(image),
            Err(e) => {
                log::warn!("Player image {} failed to load: {}", path.display(), e);
                Sprite::Placeholder
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Sprite::Placeholder)
    }
}

/// Check whether an image file can be opened and understood, without decoding it.
pub fn probe_image(path: &Path) -> bool {
    image::image_dimensions(path).is_ok()
}

/// Load the optional game-over picture. It is only shown when the file
/// passes the probe and decodes; otherwise the screen goes without it.
pub fn load_game_over_art(path: Option<&Path>) -> Option<PixelImage> {
    let path = path?;
    if !probe_image(path) {
        log::info!("Game-over image {} not available", path.display());
        return None;
    }
    PixelImage::load(path, GAME_OVER_ART_RESOLUTION)
        .map_err(|e| log::warn!("Game-over image {} failed to load: {}", path.display(), e))
        .ok()
}
