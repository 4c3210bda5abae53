//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/meshmap/meshmap.toml`
//! 3. Local config: `--config <file>`, else `./.meshmap.toml` if present
//! 4. Environment variables: `MESHMAP__<SECTION>__<KEY>`

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::DEFAULT_DIAGNOSTIC_LIMIT;
use crate::application::ApplicationError;

/// File name of the local (per-directory) config.
pub const LOCAL_CONFIG_FILE: &str = ".meshmap.toml";

/// CSV input layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CsvSettings {
    /// Header of the mesh code column
    pub code_column: String,
    /// Header of the value column
    pub value_column: String,
    /// Field delimiter (single ASCII character)
    pub delimiter: char,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            code_column: "CODE".into(),
            value_column: "Value".into(),
            delimiter: ',',
        }
    }
}

/// Transform options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransformSettings {
    /// Decode failures logged individually per run
    pub diagnostic_limit: usize,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            diagnostic_limit: DEFAULT_DIAGNOSTIC_LIMIT,
        }
    }
}

/// Polygon style written into every rendered feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleSettings {
    /// Outline width in pixels
    pub weight: f64,
    /// Outline opacity
    pub opacity: f64,
    /// Outline color
    pub color: String,
    /// Outline dash pattern
    pub dash_array: String,
    /// Fill opacity
    pub fill_opacity: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            weight: 1.0,
            opacity: 1.0,
            color: "white".into(),
            dash_array: "3".into(),
            fill_opacity: 0.6,
        }
    }
}

/// Raw CSV settings for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCsvSettings {
    pub code_column: Option<String>,
    pub value_column: Option<String>,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTransformSettings {
    pub diagnostic_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStyleSettings {
    pub weight: Option<f64>,
    pub opacity: Option<f64>,
    pub color: Option<String>,
    pub dash_array: Option<String>,
    pub fill_opacity: Option<f64>,
}

/// Raw settings for intermediate parsing.
///
/// Used during layered merging to tell "not specified" apart from an
/// explicit value.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub csv: RawCsvSettings,
    pub transform: RawTransformSettings,
    pub style: RawStyleSettings,
}

/// Unified configuration for meshmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub csv: CsvSettings,
    pub transform: TransformSettings,
    pub style: StyleSettings,
}

/// Get the XDG config directory for meshmap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "meshmap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("meshmap.toml"))
}

/// Get the path to the local config file in the current directory.
pub fn local_config_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let csv = &overlay.csv;
        let transform = &overlay.transform;
        let style = &overlay.style;
        Self {
            csv: CsvSettings {
                code_column: csv
                    .code_column
                    .clone()
                    .unwrap_or_else(|| self.csv.code_column.clone()),
                value_column: csv
                    .value_column
                    .clone()
                    .unwrap_or_else(|| self.csv.value_column.clone()),
                delimiter: csv.delimiter.unwrap_or(self.csv.delimiter),
            },
            transform: TransformSettings {
                diagnostic_limit: transform
                    .diagnostic_limit
                    .unwrap_or(self.transform.diagnostic_limit),
            },
            style: StyleSettings {
                weight: style.weight.unwrap_or(self.style.weight),
                opacity: style.opacity.unwrap_or(self.style.opacity),
                color: style
                    .color
                    .clone()
                    .unwrap_or_else(|| self.style.color.clone()),
                dash_array: style
                    .dash_array
                    .clone()
                    .unwrap_or_else(|| self.style.dash_array.clone()),
                fill_opacity: style.fill_opacity.unwrap_or(self.style.fill_opacity),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit local config; must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/meshmap/meshmap.toml`
    /// 3. Local config: `config_file`, else `./.meshmap.toml` if present
    /// 4. Environment variables: `MESHMAP__CSV__CODE_COLUMN` etc.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        match config_file {
            Some(path) => {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
            None => {
                let local_path = local_config_path();
                if local_path.exists() {
                    let raw = load_raw_settings(&local_path)?;
                    current = current.merge_with(&raw);
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;

        Ok(current)
    }

    /// Apply MESHMAP__* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("MESHMAP").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("csv.code_column") {
            settings.csv.code_column = val;
        }
        if let Ok(val) = config.get_string("csv.value_column") {
            settings.csv.value_column = val;
        }
        if let Ok(val) = config.get_string("csv.delimiter") {
            settings.csv.delimiter = single_char(&val)?;
        }
        if let Ok(val) = config.get::<usize>("transform.diagnostic_limit") {
            settings.transform.diagnostic_limit = val;
        }
        if let Ok(val) = config.get_float("style.weight") {
            settings.style.weight = val;
        }
        if let Ok(val) = config.get_float("style.opacity") {
            settings.style.opacity = val;
        }
        if let Ok(val) = config.get_string("style.color") {
            settings.style.color = val;
        }
        if let Ok(val) = config.get_string("style.dash_array") {
            settings.style.dash_array = val;
        }
        if let Ok(val) = config.get_float("style.fill_opacity") {
            settings.style.fill_opacity = val;
        }

        Ok(settings)
    }

    /// Reject values the CSV reader and renderer cannot use.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !self.csv.delimiter.is_ascii() {
            return Err(invalid(
                "csv.delimiter",
                format!("must be a single ASCII character, got {:?}", self.csv.delimiter),
            ));
        }
        if self.csv.code_column.is_empty() {
            return Err(invalid("csv.code_column", "must not be empty"));
        }
        if self.csv.value_column.is_empty() {
            return Err(invalid("csv.value_column", "must not be empty"));
        }
        for (key, val) in [
            ("style.opacity", self.style.opacity),
            ("style.fill_opacity", self.style.fill_opacity),
        ] {
            if !(0.0..=1.0).contains(&val) {
                return Err(invalid(key, format!("must be between 0 and 1, got {val}")));
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# meshmap configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/meshmap/meshmap.toml
#   Local:  --config <file>, else ./.meshmap.toml
#   Env:    MESHMAP__<SECTION>__<KEY>, e.g. MESHMAP__CSV__CODE_COLUMN=MESH

[csv]
# Header of the mesh code column
# code_column = "CODE"

# Header of the value column
# value_column = "Value"

# Field delimiter
# delimiter = ","

[transform]
# Number of decode failures logged individually
# diagnostic_limit = 5

[style]
# Polygon outline and fill, written into each GeoJSON feature
# weight = 1.0
# opacity = 1.0
# color = "white"
# dash_array = "3"
# fill_opacity = 0.6
"#
        .to_string()
    }
}

fn single_char(val: &str) -> Result<char, ApplicationError> {
    let mut chars = val.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("expected a single character, got {val:?}"),
        }),
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ApplicationError {
    ApplicationError::InvalidSetting {
        key,
        reason: reason.into(),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert_eq!(settings.csv.code_column, "CODE");
        assert_eq!(settings.csv.value_column, "Value");
        assert_eq!(settings.transform.diagnostic_limit, 5);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            csv: RawCsvSettings {
                code_column: Some("MESH".into()),
                ..Default::default()
            },
            style: RawStyleSettings {
                fill_opacity: Some(0.9),
                ..Default::default()
            },
            ..Default::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.csv.code_column, "MESH");
        assert_eq!(result.csv.value_column, "Value");
        assert_eq!(result.style.fill_opacity, 0.9);
        assert_eq!(result.style.color, "white");
        assert_eq!(result.transform, TransformSettings::default());
    }

    #[test]
    fn given_non_ascii_delimiter_when_validating_then_fails() {
        let mut settings = Settings::default();
        settings.csv.delimiter = '、';
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::InvalidSetting {
                key: "csv.delimiter",
                ..
            })
        ));
    }

    #[test]
    fn given_fill_opacity_above_one_when_validating_then_fails() {
        let mut settings = Settings::default();
        settings.style.fill_opacity = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_single_char() {
        assert_eq!(single_char(";").unwrap(), ';');
        assert!(single_char("").is_err());
        assert!(single_char(";;").is_err());
    }

    #[test]
    fn test_template_parses_as_empty_raw_settings() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.csv.code_column.is_none());
        assert!(raw.style.weight.is_none());
    }

    #[test]
    fn test_to_toml_roundtrips_defaults() {
        let toml_str = Settings::default().to_toml().unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
