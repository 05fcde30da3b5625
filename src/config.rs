//! Picker settings, loaded from `<config dir>/formx/accent-picker.json`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::constants;
use crate::error::StoreError;

const CONFIG_FILE: &str = "accent-picker.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Storage key the accent is persisted under.
    pub storage_key: String,
    /// Accent used when nothing valid is persisted.
    pub default_accent: HexColor,
    /// Degrees added to the pointer angle when mapping to hue. The default
    /// places hue 0 at the top of the wheel.
    pub hue_offset_degrees: f64,
    /// Pixels between the drawn wheel edge and the selectable radius.
    pub wheel_inset: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            storage_key: constants::ACCENT_STORAGE_KEY.to_string(),
            default_accent: constants::DEFAULT_ACCENT,
            hue_offset_degrees: constants::HUE_OFFSET_DEGREES,
            wheel_inset: constants::WHEEL_INSET,
        }
    }
}

impl PickerConfig {
    /// Load from the platform config directory, falling back to defaults.
    pub fn load() -> Self {
        let Some(config_dir) = dirs::config_dir() else {
            return Self::default();
        };
        let path = config_dir.join(constants::CONFIG_DIR_NAME).join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default picker config: {e}");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Replace values the wheel geometry cannot use with their defaults.
    fn sanitized(mut self) -> Self {
        if !self.wheel_inset.is_finite() || self.wheel_inset < 0.0 {
            log::warn!(
                "Ignoring wheel_inset {}, using {}",
                self.wheel_inset,
                constants::WHEEL_INSET
            );
            self.wheel_inset = constants::WHEEL_INSET;
        }
        if !self.hue_offset_degrees.is_finite() {
            log::warn!(
                "Ignoring hue_offset_degrees {}, using {}",
                self.hue_offset_degrees,
                constants::HUE_OFFSET_DEGREES
            );
            self.hue_offset_degrees = constants::HUE_OFFSET_DEGREES;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r##"{ "hue_offset_degrees": 0.0, "default_accent": "#D4C273" }"##).unwrap();

        let config = PickerConfig::from_path(&path).unwrap();
        assert_eq!(config.hue_offset_degrees, 0.0);
        assert_eq!(config.default_accent, HexColor::from_rgb(0xd4, 0xc2, 0x73));
        assert_eq!(config.storage_key, constants::ACCENT_STORAGE_KEY);
        assert_eq!(config.wheel_inset, constants::WHEEL_INSET);
    }

    #[test]
    fn negative_inset_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "wheel_inset": -12.0, "hue_offset_degrees": 45.0 }"#).unwrap();

        let config = PickerConfig::from_path(&path).unwrap();
        assert_eq!(config.wheel_inset, constants::WHEEL_INSET);
        assert_eq!(config.hue_offset_degrees, 45.0);
    }

    #[test]
    fn rejects_bad_accent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "default_accent": "blue" }"#).unwrap();
        assert!(matches!(PickerConfig::from_path(&path), Err(StoreError::Json { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PickerConfig::from_path(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
