//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HandsignError, HandsignResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Finger extension thresholds.
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Ordered gesture table. `None` selects the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestures: Option<Vec<GestureRuleSettings>>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Finger extension margins.
///
/// Every margin must be a finite value strictly greater than 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Threshold over the PIP-to-wrist distance.
    pub pip_margin: f64,

    /// Threshold over the MCP-to-wrist distance.
    pub mcp_margin: f64,

    /// Threshold over the thumb IP-to-wrist distance.
    pub thumb_margin: f64,

    /// Distance metric used by the thumb predicate.
    pub thumb_metric: ThumbMetric,
}

/// How thumb distances are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbMetric {
    /// Full 3D distance, consistent with the other fingers.
    #[default]
    Spatial,
    /// Image-plane distance (x, y only). Ignores depth jitter but misses
    /// thumbs pointing at the camera.
    Planar,
}

/// One entry of a configured gesture table.
///
/// Each finger field is `Some(true)` (must be extended), `Some(false)`
/// (must be curled) or absent (don't care).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GestureRuleSettings {
    /// Gesture label, e.g. `"index_up"` or a custom name.
    pub gesture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinky: Option<bool>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handsign=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            pip_margin: 1.10,
            mcp_margin: 1.30,
            thumb_margin: 1.05,
            thumb_metric: ThumbMetric::Spatial,
        }
    }
}

impl ClassifierSettings {
    /// Check every margin is finite and greater than 1.0.
    pub fn validate(&self) -> HandsignResult<()> {
        for (name, value) in [
            ("pip_margin", self.pip_margin),
            ("mcp_margin", self.mcp_margin),
            ("thumb_margin", self.thumb_margin),
        ] {
            if !value.is_finite() || value <= 1.0 {
                return Err(HandsignError::config(format!(
                    "{name} must be a finite value > 1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> HandsignResult<Self> {
        if !path.exists() {
            return Err(HandsignError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.classifier.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handsign").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins() {
        let settings = ClassifierSettings::default();
        assert_eq!(settings.pip_margin, 1.10);
        assert_eq!(settings.mcp_margin, 1.30);
        assert_eq!(settings.thumb_margin, 1.05);
        assert_eq!(settings.thumb_metric, ThumbMetric::Spatial);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_margin_at_or_below_one_is_rejected() {
        let settings = ClassifierSettings {
            mcp_margin: 1.0,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("mcp_margin"));

        let settings = ClassifierSettings {
            thumb_margin: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "classifier": { "thumb_metric": "planar", "pip_margin": 1.2 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.classifier.pip_margin, 1.2);
        assert_eq!(config.classifier.mcp_margin, 1.30);
        assert_eq!(config.classifier.thumb_metric, ThumbMetric::Planar);
        assert!(config.gestures.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_gesture_rule_settings_skip_dont_care_fingers() {
        let rule = GestureRuleSettings {
            gesture: "fist".to_string(),
            thumb: None,
            index: Some(false),
            middle: Some(false),
            ring: Some(false),
            pinky: Some(false),
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert!(!json.contains("thumb"));
        let parsed: GestureRuleSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn test_gesture_rule_settings_reject_misspelled_finger() {
        let raw = r#"{ "gesture": "index_up", "indx": true, "middle": false, "ring": false, "pinky": false }"#;
        let err = serde_json::from_str::<GestureRuleSettings>(raw).unwrap_err();
        assert!(err.to_string().contains("indx"));

        let raw = format!(r#"{{ "gestures": [{raw}] }}"#);
        assert!(serde_json::from_str::<AppConfig>(&raw).is_err());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join("handsign_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.classifier.thumb_margin = 1.2;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.classifier.thumb_margin, 1.2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_rejects_invalid_margins() {
        let dir = std::env::temp_dir().join("handsign_test_config_invalid");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{ "classifier": { "pip_margin": 0.9 } }"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HandsignError::Config { .. }));

        let missing = AppConfig::load_from(&dir.join("missing.json")).unwrap_err();
        assert!(matches!(missing, HandsignError::FileNotFound { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }
}
