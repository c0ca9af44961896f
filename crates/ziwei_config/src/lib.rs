//! Configuration and settings stores for the ziwei chart engine.
//!
//! A config file selects the palace-naming and brightness schools, the input
//! policy, the log level, and where interpretation selections are kept:
//!
//! ```toml
//! palace_school = "zhongzhou"
//! brightness_school = "斗數全書"
//! strict_input = false
//! settings_path = "ziwei-settings.toml"
//! log_level = "info"
//! ```
//!
//! Every field is optional.

pub mod error;
pub mod settings;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ziwei_base::{BrightnessSchool, BuiltinNaming, ChartEngine, ChartOptions, PalaceNamingSource};

pub use error::ConfigError;
pub use settings::{FileSettings, MemorySettings, current_interpretation, select_interpretation};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Engine configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZiweiConfig {
    pub palace_school: String,
    pub brightness_school: String,
    pub strict_input: bool,
    /// Interpretation store; in-memory when absent.
    pub settings_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ZiweiConfig {
    fn default() -> Self {
        Self {
            palace_school: ziwei_base::ZHONGZHOU_SCHOOL.to_owned(),
            brightness_school: BrightnessSchool::default().key().to_owned(),
            strict_input: false,
            settings_path: None,
            log_level: "info".to_owned(),
        }
    }
}

impl ZiweiConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let mut config = Self::from_toml_str(&text)?;
        // Relative settings paths are taken from the config file's directory.
        if let (Some(settings), Some(dir)) = (config.settings_path.as_ref(), path.parent()) {
            if settings.is_relative() {
                config.settings_path = Some(dir.join(settings));
            }
        }
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check schools and log level against the known values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if BuiltinNaming::new()
            .naming_table(&self.palace_school)
            .is_none()
        {
            return Err(ConfigError::UnknownPalaceSchool(self.palace_school.clone()));
        }
        self.brightness()?;
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }

    fn brightness(&self) -> Result<BrightnessSchool, ConfigError> {
        BrightnessSchool::from_key(&self.brightness_school)
            .ok_or_else(|| ConfigError::UnknownBrightnessSchool(self.brightness_school.clone()))
    }

    /// Engine options described by this config.
    pub fn chart_options(&self) -> Result<ChartOptions, ConfigError> {
        Ok(ChartOptions {
            palace_school: self.palace_school.clone(),
            brightness_school: self.brightness()?,
            strict_input: self.strict_input,
        })
    }

    /// Settings store named by the config.
    pub fn open_settings(&self) -> Result<SettingsStore, ConfigError> {
        match &self.settings_path {
            Some(path) => Ok(SettingsStore::File(Arc::new(FileSettings::open(path)?))),
            None => Ok(SettingsStore::Memory(Arc::new(MemorySettings::new()))),
        }
    }

    /// Engine wired with the built-in naming tables and `settings`.
    pub fn build_engine(&self, settings: &SettingsStore) -> Result<ChartEngine, ConfigError> {
        let builder = ChartEngine::builder()
            .naming(BuiltinNaming::new())
            .options(self.chart_options()?);
        let builder = match settings {
            SettingsStore::Memory(s) => builder.settings(Arc::clone(s)),
            SettingsStore::File(s) => builder.settings(Arc::clone(s)),
        };
        Ok(builder.build()?)
    }
}

/// The settings store chosen by a config, shared with the engine.
#[derive(Debug, Clone)]
pub enum SettingsStore {
    Memory(Arc<MemorySettings>),
    File(Arc<FileSettings>),
}

impl SettingsStore {
    /// The store as a settings provider.
    pub fn as_provider(&self) -> &dyn ziwei_base::SettingsProvider {
        match self {
            Self::Memory(s) => s.as_ref(),
            Self::File(s) => s.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ZiweiConfig::default();
        config.validate().unwrap();
        assert_eq!(config.brightness_school, "斗數全書");
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ZiweiConfig::from_toml_str("").unwrap(), ZiweiConfig::default());
    }

    #[test]
    fn parses_fields() {
        let config = ZiweiConfig::from_toml_str(
            r#"
            palace_school = "quanshu"
            strict_input = true
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.palace_school, "quanshu");
        assert!(config.strict_input);
        let options = config.chart_options().unwrap();
        assert!(options.strict_input);
        assert_eq!(options.brightness_school, BrightnessSchool::Quanshu);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ZiweiConfig::from_toml_str(r#"palace_school = "nope""#),
            Err(ConfigError::UnknownPalaceSchool(_))
        ));
        assert!(matches!(
            ZiweiConfig::from_toml_str(r#"brightness_school = "nope""#),
            Err(ConfigError::UnknownBrightnessSchool(_))
        ));
        assert!(matches!(
            ZiweiConfig::from_toml_str(r#"log_level = "loud""#),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            ZiweiConfig::from_toml_str("colour = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn memory_store_feeds_engine() {
        let config = ZiweiConfig::default();
        let store = config.open_settings().unwrap();
        assert!(matches!(store, SettingsStore::Memory(_)));
        let engine = config.build_engine(&store).unwrap();
        select_interpretation(store.as_provider(), '壬', "interpretation_2").unwrap();
        assert_eq!(
            engine.settings().get("stemInterpretation_壬").as_deref(),
            Some("interpretation_2")
        );
    }
}
