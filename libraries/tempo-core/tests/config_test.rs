//! Configuration loading tests

use tempo_core::{CoreError, PlayerConfig, RepeatMode};

#[test]
fn empty_document_uses_defaults() {
    let config = PlayerConfig::from_toml("").unwrap();

    assert_eq!(config, PlayerConfig::default());
    assert_eq!(config.playback.volume, 1.0);
    assert_eq!(config.playback.repeat, RepeatMode::Off);
    assert_eq!(config.catalog.base_url, "/api/jamendo");
    assert_eq!(config.catalog.default_limit, 20);
}

#[test]
fn sections_override_defaults() {
    let config = PlayerConfig::from_toml(
        r#"
        [playback]
        volume = 0.4
        shuffle = true
        repeat = "all"

        [catalog]
        base_url = "https://proxy.example/api/catalog"
        "#,
    )
    .unwrap();

    assert!((config.playback.volume - 0.4).abs() < f32::EPSILON);
    assert!(config.playback.shuffle);
    assert_eq!(config.playback.repeat, RepeatMode::All);
    assert_eq!(config.catalog.base_url, "https://proxy.example/api/catalog");
    assert_eq!(config.catalog.default_limit, 20);
}

#[test]
fn out_of_range_volume_is_rejected() {
    let err = PlayerConfig::from_toml("[playback]\nvolume = 1.5\n").unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn zero_page_size_is_rejected() {
    let err = PlayerConfig::from_toml("[catalog]\ndefault_limit = 0\n").unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn unknown_repeat_mode_is_a_config_error() {
    let err = PlayerConfig::from_toml("[playback]\nrepeat = \"forever\"\n").unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn load_from_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo.toml");
    std::fs::write(&path, "[playback]\nrepeat = \"one\"\n").unwrap();

    let config = PlayerConfig::load_from(&path).unwrap();
    assert_eq!(config.playback.repeat, RepeatMode::One);
}

#[test]
fn load_from_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlayerConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.catalog.default_limit, 20);
}
