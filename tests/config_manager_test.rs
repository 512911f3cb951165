//! 配置管理器测试
//!
//! 测试配置文件的加载、保存和错误处理

use cloth_dryer::app::config::manager::{AppConfig, ConfigManager};
use cloth_dryer::app::config::types::AppSettings;
use cloth_dryer::DryerError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_file_is_created_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut manager = ConfigManager::with_file(&config_path);
    manager.load().unwrap();

    assert!(config_path.exists(), "Default config should be written");
    assert!(manager.created_default());
    assert_eq!(manager.config(), &AppConfig::default());

    let mut reloaded = ConfigManager::with_file(&config_path);
    reloaded.load().unwrap();
    assert!(!reloaded.created_default());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[simulation]"));
    assert!(content.contains("[ui]"));
    assert!(content.contains("[logging]"));
}

#[test]
fn test_config_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut manager = ConfigManager::with_file(&config_path);
    manager.config_mut().simulation.time_scale = 30.0;
    manager.config_mut().ui.return_delay_secs = 5;
    manager.config_mut().logging.file_prefix = "trockner".to_string();
    manager.save().unwrap();

    let mut reloaded = ConfigManager::with_file(&config_path);
    reloaded.load().unwrap();

    assert_eq!(reloaded.config(), manager.config());
    let settings = reloaded.settings().unwrap();
    assert_eq!(settings.simulation.time_scale, 30.0);
    assert_eq!(settings.ui.return_delay, Duration::from_secs(5));
    assert_eq!(settings.logging.file_prefix, "trockner");
}

#[test]
fn test_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[simulation]
time_scale = 10.0
"#,
    )
    .unwrap();

    let mut manager = ConfigManager::with_file(&config_path);
    manager.load().unwrap();

    let config = manager.config();
    assert_eq!(config.simulation.time_scale, 10.0);
    assert_eq!(config.simulation.tick_interval_ms, 1000);
    assert_eq!(config.ui.refresh_interval_ms, 500);
    assert_eq!(config.logging.directory, "logs");
}

#[test]
fn test_invalid_toml_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[simulation]
time_scale =
"#,
    )
    .unwrap();

    let mut manager = ConfigManager::with_file(&config_path);
    let err = manager.load().unwrap_err();

    assert!(err.to_string().contains("Failed to parse config file"));
    assert!(matches!(DryerError::from(err), DryerError::Config { .. }));
}

#[test]
fn test_invalid_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[simulation]
tick_interval_ms = 0
"#,
    )
    .unwrap();

    let mut manager = ConfigManager::with_file(&config_path);
    manager.load().unwrap();

    assert!(matches!(
        manager.settings(),
        Err(DryerError::Validation { ref field, .. }) if field == "simulation.tick_interval_ms"
    ));
}

#[test]
fn test_default_settings() {
    let settings = AppSettings::try_from(&AppConfig::default()).unwrap();
    assert_eq!(settings.simulation.tick_interval, Duration::from_secs(1));
    assert_eq!(settings.ui.refresh_interval, Duration::from_millis(500));
    assert_eq!(settings.ui.window_size, [400.0, 420.0]);
}
