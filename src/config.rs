/// User configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/neural-gallery/config.json
/// - macOS: ~/Library/Application Support/neural-gallery/config.json
/// - Windows: %APPDATA%\neural-gallery\config.json
///
/// Every field has a default, so a partial file is valid and a missing
/// file means "all defaults".
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scene::composer::DEFAULT_PLACEHOLDER_MESSAGE;
use crate::scene::layout::{FALLBACK_POSITION, PLACEHOLDER_POSITION, REFERENCE_SLOTS};
use crate::scene::{SceneComposer, SlotLayout};

const APP_DIR: &str = "neural-gallery";
const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Artist credited on generated artworks
    pub artist: String,
    /// Simulated delay of the filter transform, per style
    pub transform_latency_ms: u64,
    /// Wall slots, in fill order
    pub slot_positions: Vec<[f32; 3]>,
    /// Position of artworks beyond the slot table
    pub fallback_position: [f32; 3],
    /// Position of the empty-gallery prompt
    pub placeholder_position: [f32; 3],
    pub placeholder_message: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            artist: crate::pipeline::queue::DEFAULT_ARTIST.to_string(),
            transform_latency_ms: 0,
            slot_positions: REFERENCE_SLOTS.to_vec(),
            fallback_position: FALLBACK_POSITION,
            placeholder_position: PLACEHOLDER_POSITION,
            placeholder_message: DEFAULT_PLACEHOLDER_MESSAGE.to_string(),
        }
    }
}

impl GalleryConfig {
    /// Get the path where the config file is stored
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Some(path)
    }

    /// Load from the default location, falling back to defaults when the
    /// location is unknown or the file does not exist
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn transform_latency(&self) -> Duration {
        Duration::from_millis(self.transform_latency_ms)
    }

    pub fn layout(&self) -> SlotLayout {
        SlotLayout::new(
            self.slot_positions.iter().copied(),
            self.fallback_position,
            self.placeholder_position,
        )
    }

    pub fn composer(&self) -> SceneComposer {
        SceneComposer::new(self.layout()).with_placeholder_message(self.placeholder_message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GalleryConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.layout(), SlotLayout::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "artist": "Studio", "transform_latency_ms": 2000 }"#).unwrap();

        let config = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(config.artist, "Studio");
        assert_eq!(config.transform_latency(), Duration::from_secs(2));
        assert_eq!(config.slot_positions, REFERENCE_SLOTS.to_vec());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            GalleryConfig::load_from(&path),
            Err(GalleryError::Config(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = GalleryConfig {
            slot_positions: vec![[1.0, 2.0, 3.0]],
            placeholder_message: "Drop an image".to_string(),
            ..GalleryConfig::default()
        };
        config.save_to(&path).unwrap();

        let reloaded = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.layout().len(), 1);
        assert_eq!(reloaded.composer().compose(&[])[0].label(), "Drop an image");
    }
}
