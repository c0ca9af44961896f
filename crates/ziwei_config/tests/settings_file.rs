//! File-backed settings and config loading against a scratch directory.

use std::fs;
use std::sync::Arc;
use std::thread;

use ziwei_base::{Gender, HeavenlyStem, LunarBirthRecord, Mutation, SettingsProvider, Star};
use ziwei_config::{
    ConfigError, FileSettings, SettingsStore, ZiweiConfig, current_interpretation,
    select_interpretation,
};

#[test]
fn selection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    let store = FileSettings::open(&path).unwrap();
    assert!(store.snapshot().is_empty());
    select_interpretation(&store, '庚', "interpretation_4").unwrap();
    assert!(path.exists());

    let reopened = FileSettings::open(&path).unwrap();
    assert_eq!(
        reopened.get("stemInterpretation_庚").as_deref(),
        Some("interpretation_4")
    );
    assert_eq!(
        current_interpretation(&reopened, HeavenlyStem::Geng),
        "interpretation_4"
    );
}

#[test]
fn nested_settings_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("settings.toml");
    let store = FileSettings::open(&path).unwrap();
    store.set("k", "v");
    assert_eq!(fs::read_to_string(&path).unwrap().trim(), r#"k = "v""#);
}

#[test]
fn concurrent_writes_all_reach_disk() {
    let dir = tempfile::tempdir().unwrap();
    for round in 0..20 {
        let path = dir.path().join(format!("settings-{round}.toml"));
        let store = Arc::new(FileSettings::open(&path).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.set(&format!("k{i}"), "v"))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let reopened = FileSettings::open(&path).unwrap();
        assert_eq!(reopened.snapshot().len(), 8, "round {round}");
        assert!(!path.with_extension("toml.tmp").exists());
    }
}

#[test]
fn failed_persist_keeps_value_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("blocked");
    let path = blocked.join("settings.toml");
    let store = FileSettings::open(&path).unwrap();
    // A regular file where the settings directory should go.
    fs::write(&blocked, "").unwrap();

    store.set("stemInterpretation_甲", "interpretation_2");
    assert_eq!(
        store.get("stemInterpretation_甲").as_deref(),
        Some("interpretation_2")
    );
    assert!(matches!(store.flush(), Err(ConfigError::Io { .. })));
    assert!(!path.exists());
}

#[test]
fn malformed_settings_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "not = [valid").unwrap();
    assert!(matches!(FileSettings::open(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn config_file_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("ziwei.toml");
    fs::write(
        &config_path,
        r#"
palace_school = "quanshu"
settings_path = "store.toml"
"#,
    )
    .unwrap();

    let config = ZiweiConfig::load(&config_path).unwrap();
    assert_eq!(config.settings_path, Some(dir.path().join("store.toml")));

    let store = config.open_settings().unwrap();
    assert!(matches!(store, SettingsStore::File(_)));
    let engine = config.build_engine(&store).unwrap();

    let record = LunarBirthRecord::new(1990, 6, 15, 3, false, Gender::Female);
    let before = engine.compute(&record).unwrap();
    assert_eq!(before.mutations.star(Mutation::Taboo), Some(Star::TianTong));

    select_interpretation(store.as_provider(), '庚', "interpretation_2").unwrap();
    let after = engine.compute(&record).unwrap();
    assert_eq!(after.mutations.star(Mutation::Taboo), Some(Star::TaiYin));
    assert_eq!(after.palaces.get(9).unwrap().name, "奴僕");

    // A fresh store over the same file sees the selection.
    let again = config.open_settings().unwrap();
    assert_eq!(
        current_interpretation(again.as_provider(), HeavenlyStem::Geng),
        "interpretation_2"
    );
}

#[test]
fn missing_config_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    match ZiweiConfig::load(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}
