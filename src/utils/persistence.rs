//! JSON persistence helpers for ~/.skydash/ files.
//!
//! Shared by the score store and the config loader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.skydash/ directory path, creating it if needed.
pub fn skydash_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".skydash");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.skydash/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(skydash_dir()?.join(filename))
}

/// Load a JSON file from ~/.skydash/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match save_path(filename) {
        Ok(path) => load_json_at(&path),
        Err(_) => T::default(),
    }
}

/// Load a JSON file at an explicit path, returning `T::default()` if missing or invalid.
pub fn load_json_at<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON at an explicit path.
///
/// Writes to a sibling temp file first and renames it over the target so a
/// crash mid-write never leaves a truncated file behind.
pub fn save_json_at<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_save_path_format() {
        let path = save_path("test.json").expect("save_path should succeed");
        assert!(path.to_string_lossy().ends_with(".skydash/test.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let val: Vec<String> = load_json_at(&dir.path().join("nope.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_garbage_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.json");
        fs::write(&path, "{ not json").unwrap();

        let val: BTreeMap<String, String> = load_json_at(&path);
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let data = vec!["hello".to_string(), "world".to_string()];

        save_json_at(&path, &data).expect("save should succeed");

        let loaded: Vec<String> = load_json_at(&path);
        assert_eq!(loaded, data);
        assert!(!path.with_extension("tmp").exists());
    }
}
