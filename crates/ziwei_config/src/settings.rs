//! Interpretation settings stores.
//!
//! Both stores keep a string map behind a `parking_lot::RwLock` so one store
//! can serve concurrent chart computations. [`FileSettings`] also mirrors the
//! map to a TOML file after each write.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};
use ziwei_base::{
    ChartError, DEFAULT_INTERPRETATION, HeavenlyStem, SettingsProvider, interpretation_key,
    interpretations, is_controversial,
};

use crate::error::ConfigError;

/// Process-local settings.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettings {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.read().clone()
    }
}

impl SettingsProvider for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_owned(), value.to_owned());
    }
}

/// Settings persisted to a TOML file.
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
    /// Held from snapshot to rename; one writer owns the temp file at a time.
    persist: Mutex<()>,
}

impl FileSettings {
    /// Open the store at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ConfigError::io(&path, e)),
        };
        debug!(path = %path.display(), "settings loaded");
        Ok(Self {
            path,
            values: RwLock::new(values),
            persist: Mutex::new(()),
        })
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.read().clone()
    }

    /// Write the current map to disk.
    pub fn flush(&self) -> Result<(), ConfigError> {
        let _guard = self.persist.lock();
        let text = toml::to_string(&*self.values.read())?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;
        }
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, text).map_err(|e| ConfigError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| ConfigError::io(&self.path, e))
    }
}

impl SettingsProvider for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.flush() {
            warn!(key, error = %e, "settings not persisted; value kept in memory");
        }
    }
}

/// Interpretation currently selected for `stem`.
pub fn current_interpretation(settings: &dyn SettingsProvider, stem: HeavenlyStem) -> String {
    settings
        .get(&interpretation_key(stem))
        .unwrap_or_else(|| DEFAULT_INTERPRETATION.to_owned())
}

/// Validate and store an interpretation selection for the stem `stem_char`.
pub fn select_interpretation(
    settings: &dyn SettingsProvider,
    stem_char: char,
    key: &str,
) -> Result<(), ConfigError> {
    let stem = HeavenlyStem::from_char(stem_char).ok_or(ChartError::UnknownStem(stem_char))?;
    if !is_controversial(stem) {
        return Err(ConfigError::NotControversial(stem_char));
    }
    if !interpretations(stem).contains(&key) {
        return Err(ConfigError::UnknownInterpretation {
            stem: stem_char,
            key: key.to_owned(),
        });
    }
    settings.set(&interpretation_key(stem), key);
    Ok(())
}
