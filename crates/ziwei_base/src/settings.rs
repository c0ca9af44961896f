//! Key-value settings consumed by the chart engine.
//!
//! The core only reads interpretation selections through this trait; the
//! stores themselves live in `ziwei_config`.

use std::sync::Arc;

use crate::ganzhi::HeavenlyStem;

/// Prefix of per-stem interpretation keys (`stemInterpretation_甲`, ...).
pub const INTERPRETATION_KEY_PREFIX: &str = "stemInterpretation_";

/// A string-keyed settings store shared across chart computations.
///
/// Implementations own their synchronization; `set` takes `&self`.
pub trait SettingsProvider {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

/// Settings key holding the interpretation selected for `stem`.
pub fn interpretation_key(stem: HeavenlyStem) -> String {
    format!("{INTERPRETATION_KEY_PREFIX}{}", stem.as_char())
}

/// A store that holds nothing; every stem resolves to its default table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettings;

impl SettingsProvider for NoSettings {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) {
        tracing::debug!(key, "settings write ignored by empty store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        assert_eq!(interpretation_key(HeavenlyStem::Geng), "stemInterpretation_庚");
    }

    #[test]
    fn empty_store_forgets() {
        let s = NoSettings;
        s.set("stemInterpretation_甲", "interpretation_2");
        assert_eq!(s.get("stemInterpretation_甲"), None);
    }

    #[test]
    fn arc_forwards() {
        let s: Arc<dyn SettingsProvider> = Arc::new(NoSettings);
        assert_eq!(s.get("anything"), None);
    }
}
