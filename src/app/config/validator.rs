//! 配置验证模块
//!
//! 负责验证模拟、界面和日志配置参数

use crate::app::error::types::{AppError, Result};

use super::manager::{AppConfig, LoggingConfig, SimulationConfig, UiConfig};

/// 后台刷新周期的允许范围（毫秒）
const TICK_INTERVAL_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=10_000;
/// 模拟时间倍率上限
const MAX_TIME_SCALE: f64 = 1000.0;
/// 返回延迟和衣物提示时长的上限（秒）
const MAX_UI_DELAY_SECS: u64 = 60;
/// 窗口最小边长
const MIN_WINDOW_EDGE: f32 = 200.0;

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证完整配置
    pub fn validate(config: &AppConfig) -> Result<()> {
        Self::validate_simulation_config(&config.simulation)?;
        Self::validate_ui_config(&config.ui)?;
        Self::validate_logging_config(&config.logging)?;
        Ok(())
    }

    /// 验证模拟配置
    pub fn validate_simulation_config(
        config: &SimulationConfig,
    ) -> Result<()> {
        if !TICK_INTERVAL_RANGE_MS.contains(&config.tick_interval_ms) {
            return Err(AppError::validation(
                "simulation.tick_interval_ms",
                format!(
                    "Must be between {} and {}",
                    TICK_INTERVAL_RANGE_MS.start(),
                    TICK_INTERVAL_RANGE_MS.end()
                ),
            ));
        }

        if !config.time_scale.is_finite()
            || config.time_scale <= 0.0
            || config.time_scale > MAX_TIME_SCALE
        {
            return Err(AppError::validation(
                "simulation.time_scale",
                format!("Must be greater than 0 and at most {MAX_TIME_SCALE}"),
            ));
        }

        Ok(())
    }

    /// 验证界面配置
    pub fn validate_ui_config(config: &UiConfig) -> Result<()> {
        if config.refresh_interval_ms == 0 {
            return Err(AppError::validation(
                "ui.refresh_interval_ms",
                "Refresh interval cannot be 0",
            ));
        }

        if config.return_delay_secs > MAX_UI_DELAY_SECS {
            return Err(AppError::validation(
                "ui.return_delay_secs",
                format!("Must be at most {MAX_UI_DELAY_SECS} seconds"),
            ));
        }

        if config.laundry_confirmation_secs > MAX_UI_DELAY_SECS {
            return Err(AppError::validation(
                "ui.laundry_confirmation_secs",
                format!("Must be at most {MAX_UI_DELAY_SECS} seconds"),
            ));
        }

        if config.window_width < MIN_WINDOW_EDGE
            || config.window_height < MIN_WINDOW_EDGE
        {
            return Err(AppError::validation(
                "ui.window_width/window_height",
                format!("Window must be at least {MIN_WINDOW_EDGE} pixels wide and high"),
            ));
        }

        Ok(())
    }

    /// 验证日志配置
    pub fn validate_logging_config(
        config: &LoggingConfig,
    ) -> Result<()> {
        if config.directory.trim().is_empty() {
            return Err(AppError::validation(
                "logging.directory",
                "Directory cannot be empty",
            ));
        }

        if config.file_prefix.trim().is_empty() {
            return Err(AppError::validation(
                "logging.file_prefix",
                "File prefix cannot be empty",
            ));
        }

        if config
            .file_prefix
            .contains(|c: char| c == '/' || c == '\\')
        {
            return Err(AppError::validation(
                "logging.file_prefix",
                "File prefix cannot contain path separators",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::error::types::DryerError;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_tick_interval_bounds() {
        let mut config = SimulationConfig::default();
        config.tick_interval_ms = 5;
        assert!(ConfigValidator::validate_simulation_config(&config).is_err());

        config.tick_interval_ms = 10_000;
        assert!(ConfigValidator::validate_simulation_config(&config).is_ok());
    }

    #[test]
    fn test_time_scale_must_be_positive_and_finite() {
        for scale in [0.0, -1.0, f64::NAN, 5000.0] {
            let config = SimulationConfig {
                time_scale: scale,
                ..SimulationConfig::default()
            };
            let result =
                ConfigValidator::validate_simulation_config(&config);
            assert!(
                matches!(result, Err(DryerError::Validation { ref field, .. }) if field == "simulation.time_scale"),
                "time_scale {scale} should be rejected"
            );
        }
    }

    #[test]
    fn test_ui_config_validation() {
        let mut config = UiConfig::default();
        config.refresh_interval_ms = 0;
        assert!(ConfigValidator::validate_ui_config(&config).is_err());

        let config = UiConfig {
            window_width: 100.0,
            ..UiConfig::default()
        };
        assert!(ConfigValidator::validate_ui_config(&config).is_err());
    }

    #[test]
    fn test_ui_delays_are_bounded() {
        let config = UiConfig {
            return_delay_secs: u64::MAX / 2,
            ..UiConfig::default()
        };
        assert!(matches!(
            ConfigValidator::validate_ui_config(&config),
            Err(DryerError::Validation { ref field, .. }) if field == "ui.return_delay_secs"
        ));

        let config = UiConfig {
            laundry_confirmation_secs: 61,
            ..UiConfig::default()
        };
        assert!(matches!(
            ConfigValidator::validate_ui_config(&config),
            Err(DryerError::Validation { ref field, .. }) if field == "ui.laundry_confirmation_secs"
        ));

        let config = UiConfig {
            return_delay_secs: 60,
            laundry_confirmation_secs: 0,
            ..UiConfig::default()
        };
        assert!(ConfigValidator::validate_ui_config(&config).is_ok());
    }

    #[test]
    fn test_logging_config_validation() {
        let config = LoggingConfig {
            directory: "  ".to_string(),
            ..LoggingConfig::default()
        };
        assert!(ConfigValidator::validate_logging_config(&config).is_err());

        let config = LoggingConfig {
            file_prefix: "../escape".to_string(),
            ..LoggingConfig::default()
        };
        assert!(ConfigValidator::validate_logging_config(&config).is_err());
    }
}
