//! 运行时设置
//!
//! 由 [`AppConfig`] 校验转换而来，模拟器和界面只使用这里的类型。

use std::path::PathBuf;
use std::time::Duration;

use crate::app::error::types::{DryerError, Result};

use super::manager::AppConfig;
use super::validator::ConfigValidator;

/// 模拟器设置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub tick_interval: Duration,
    pub time_scale: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
            time_scale: 1.0,
        }
    }
}

/// 界面设置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiSettings {
    pub refresh_interval: Duration,
    pub return_delay: Duration,
    pub laundry_confirmation: Duration,
    pub window_size: [f32; 2],
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(500),
            return_delay: Duration::from_secs(3),
            laundry_confirmation: Duration::from_secs(2),
            window_size: [400.0, 420.0],
        }
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "dryerlog".to_string(),
        }
    }
}

/// 全部运行时设置
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    pub simulation: SimulationSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

impl TryFrom<&AppConfig> for AppSettings {
    type Error = DryerError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        ConfigValidator::validate(config)?;

        Ok(Self {
            simulation: SimulationSettings {
                tick_interval: Duration::from_millis(
                    config.simulation.tick_interval_ms,
                ),
                time_scale: config.simulation.time_scale,
            },
            ui: UiSettings {
                refresh_interval: Duration::from_millis(
                    config.ui.refresh_interval_ms,
                ),
                return_delay: Duration::from_secs(
                    config.ui.return_delay_secs,
                ),
                laundry_confirmation: Duration::from_secs(
                    config.ui.laundry_confirmation_secs,
                ),
                window_size: [
                    config.ui.window_width,
                    config.ui.window_height,
                ],
            },
            logging: LoggingSettings {
                directory: PathBuf::from(&config.logging.directory),
                file_prefix: config.logging.file_prefix.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_settings() {
        let settings =
            AppSettings::try_from(&AppConfig::default()).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.simulation.time_scale = 0.0;
        assert!(matches!(
            AppSettings::try_from(&config),
            Err(DryerError::Validation { .. })
        ));
    }
}
