//! File-backed logger setup.
//!
//! The terminal is in raw mode with the alternate screen active while the game
//! runs, so log records go to ~/.skydash/skydash.log instead of stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Install the global logger, appending to `path`.
///
/// `level` overrides `RUST_LOG` when given. Calling this twice is harmless:
/// the second installation attempt is ignored.
pub fn init_file_logger(path: &Path, level: Option<&str>) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis();

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
    Ok(())
}
