//! # Configuration
//!
//! Per-operation barcode settings ([`BarcodeConfig`]) and the persisted
//! application defaults ([`AppConfig`], JSON on disk).
//!
//! `BarcodeConfig` is a plain value object owned by the caller of
//! [`crate::render::generate`]; nothing here is shared or mutated behind
//! the caller's back. `AppConfig` only models the data shape and its
//! load/save round trip — where the file lives and when it is written is
//! the caller's business.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EtiquetaError;
use crate::symbology::BarcodeType;

/// Settings for a single barcode generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeConfig {
    /// Symbology to render
    pub symbology: BarcodeType,
    /// Output image width in pixels (must be > 0)
    pub width: u32,
    /// Output image height in pixels (must be > 0)
    pub height: u32,
    /// Quiet-zone margin in pixels on every side
    pub margin: u32,
    /// Whether a human-readable caption is wanted (carried for the host
    /// dialog; the raster pipeline itself draws bars only)
    pub show_text: bool,
    /// Nominal print resolution, dots per inch
    pub dpi: u32,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            symbology: BarcodeType::Code128,
            width: 200,
            height: 80,
            margin: 10,
            show_text: true,
            dpi: 300,
        }
    }
}

impl BarcodeConfig {
    /// A config for the given symbology with default dimensions.
    pub fn for_symbology(symbology: BarcodeType) -> Self {
        Self {
            symbology,
            ..Self::default()
        }
    }
}

/// Persisted application defaults.
///
/// Serialized as JSON. Unknown fields are ignored on load so older files
/// keep working when new settings appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Symbology preselected for new barcodes
    pub default_symbology: BarcodeType,
    /// Default image width in pixels
    pub default_width: u32,
    /// Default image height in pixels
    pub default_height: u32,
    /// Default quiet-zone margin in pixels
    pub default_margin: u32,
    /// Default human-readable caption setting
    pub default_show_text: bool,
    /// Directory generated images are written to
    pub output_directory: String,
    /// Default print resolution, dots per inch
    pub default_dpi: u32,
    /// Recently processed files, most recent first
    pub recent_files: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_symbology: BarcodeType::Code128,
            default_width: 200,
            default_height: 80,
            default_margin: 10,
            default_show_text: true,
            output_directory: String::new(),
            default_dpi: 300,
            recent_files: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, EtiquetaError> {
        let text = fs::read_to_string(path).map_err(|e| {
            EtiquetaError::ConfigLoad(format!("{}: {}", path.display(), e))
        })?;
        Self::deserialize_json(&text)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), EtiquetaError> {
        let text = self.serialize_json()?;
        fs::write(path, text).map_err(|e| {
            EtiquetaError::ConfigSave(format!("{}: {}", path.display(), e))
        })
    }

    /// Serialize to a JSON string.
    pub fn serialize_json(&self) -> Result<String, EtiquetaError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EtiquetaError::ConfigSave(e.to_string()))
    }

    /// Deserialize from a JSON string.
    pub fn deserialize_json(text: &str) -> Result<Self, EtiquetaError> {
        serde_json::from_str(text).map_err(|e| EtiquetaError::ConfigLoad(e.to_string()))
    }

    /// Build a per-operation [`BarcodeConfig`] from these defaults.
    pub fn barcode_config(&self) -> BarcodeConfig {
        BarcodeConfig {
            symbology: self.default_symbology,
            width: self.default_width,
            height: self.default_height,
            margin: self.default_margin,
            show_text: self.default_show_text,
            dpi: self.default_dpi,
        }
    }

    /// Record `path` as most recently used, deduplicating and keeping at
    /// most `limit` entries.
    pub fn touch_recent(&mut self, path: &str, limit: usize) {
        self.recent_files.retain(|p| p != path);
        self.recent_files.insert(0, path.to_string());
        self.recent_files.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_legacy() {
        let config = AppConfig::default();
        assert_eq!(config.default_symbology, BarcodeType::Code128);
        assert_eq!(config.default_width, 200);
        assert_eq!(config.default_height, 80);
        assert!(config.default_show_text);
        assert_eq!(config.default_dpi, 300);
        assert!(config.recent_files.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = AppConfig::default();
        config.default_symbology = BarcodeType::QrCode;
        config.output_directory = "/tmp/barcodes".to_string();
        config.recent_files = vec!["a.drw".to_string(), "b.drw".to_string()];

        let json = config.serialize_json().unwrap();
        let restored = AppConfig::deserialize_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let restored = AppConfig::deserialize_json(r#"{"default_width": 640}"#).unwrap();
        assert_eq!(restored.default_width, 640);
        assert_eq!(restored.default_height, 80);
        assert_eq!(restored.default_symbology, BarcodeType::Code128);
    }

    #[test]
    fn test_bad_json_is_config_load_error() {
        let err = AppConfig::deserialize_json("{nope").unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::ConfigLoadFailed);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut config = AppConfig::default();
        config.touch_recent("part_a.drw", 10);
        config.save(&path).unwrap();

        let restored = AppConfig::load(&path).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/no/such/settings.json")).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::ConfigLoadFailed);
    }

    #[test]
    fn test_touch_recent_dedup_and_cap() {
        let mut config = AppConfig::default();
        config.touch_recent("a", 3);
        config.touch_recent("b", 3);
        config.touch_recent("a", 3);
        assert_eq!(config.recent_files, vec!["a", "b"]);

        config.touch_recent("c", 3);
        config.touch_recent("d", 3);
        assert_eq!(config.recent_files, vec!["d", "c", "a"]);
    }

    #[test]
    fn test_barcode_config_from_defaults() {
        let app = AppConfig::default();
        let barcode = app.barcode_config();
        assert_eq!(barcode, BarcodeConfig::default());
    }
}
