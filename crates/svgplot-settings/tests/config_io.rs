use svgplot_settings::{Config, OutputCoordinates, SettingsError};
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.machine.bed_max_x = 150.0;
    config.conversion.output_coordinates = OutputCoordinates::Device;
    config.templates.shape_preamble = "G1 Z0.2".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.conversion.smoothness = 0.5;
    config.conversion.write_debug_log = false;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[machine]\nbed_max_y = 300.0\n\n[conversion]\noutput_coordinates = \"device\"\n",
    )
    .unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.machine.bed_max_y, 300.0);
    assert_eq!(loaded.machine.bed_max_x, 200.0);
    assert_eq!(loaded.conversion.output_coordinates, OutputCoordinates::Device);
    assert_eq!(loaded.conversion.smoothness, 0.2);
    assert_eq!(loaded.templates, Config::default().templates);
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[conversion]\nsmoothness = -1.0\n").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Config::load_from_file(&dir.path().join("absent.toml")),
        Err(SettingsError::IoError(_))
    ));
}
