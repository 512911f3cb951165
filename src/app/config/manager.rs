//! 配置管理模块
//! 负责加载、保存和管理应用程序配置

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::ConfigPaths;
use super::types::AppSettings;

/// 应用程序配置结构
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// 模拟配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// 后台刷新周期（毫秒）
    pub tick_interval_ms: u64,
    /// 模拟时间倍率，1.0 为实时
    pub time_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            time_scale: 1.0,
        }
    }
}

/// 界面配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_interval_ms: u64,
    /// 程序结束后返回选择界面前的等待时间
    pub return_delay_secs: u64,
    pub laundry_confirmation_secs: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 500,
            return_delay_secs: 3,
            laundry_confirmation_secs: 2,
            window_width: 400.0,
            window_height: 420.0,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "dryerlog".to_string(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager {
    config_paths: ConfigPaths,
    config: AppConfig,
    created_default: bool,
}

impl ConfigManager {
    /// 使用默认查找规则创建配置管理器
    pub fn new() -> Result<Self> {
        let config_paths = ConfigPaths::new()?;

        Ok(Self {
            config_paths,
            config: AppConfig::default(),
            created_default: false,
        })
    }

    /// 使用指定的配置文件创建配置管理器
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_paths: ConfigPaths::from_file(path),
            config: AppConfig::default(),
            created_default: false,
        }
    }

    /// 加载配置文件，不存在时写入默认配置
    pub fn load(&mut self) -> Result<()> {
        self.config_paths.ensure_config_dir_exists()?;

        let config_file = self.config_paths.config_file();

        let config_file_existed = config_file.exists();
        if config_file_existed {
            let content = fs::read_to_string(config_file)
                .with_context(|| {
                    format!(
                        "Failed to read config file: {:?}",
                        config_file
                    )
                })?;

            self.config = toml::from_str(&content)
                .with_context(|| {
                    format!(
                        "Failed to parse config file: {:?}",
                        config_file
                    )
                })?;

            tracing::info!(
                "Config file loaded: {:?}",
                config_file
            );
        } else {
            tracing::info!(
                "Config file not found, using defaults: {:?}",
                config_file
            );
            self.save()?;
        }
        self.created_default = !config_file_existed;
        Ok(())
    }

    /// 保存配置文件
    pub fn save(&self) -> Result<()> {
        self.config_paths.ensure_config_dir_exists()?;

        let content = toml::to_string_pretty(&self.config)
            .context("Failed to serialize config")?;

        let config_file = self.config_paths.config_file();
        fs::write(config_file, content).with_context(|| {
            format!(
                "Failed to write config file: {:?}",
                config_file
            )
        })?;

        tracing::info!("Config file saved: {:?}", config_file);
        Ok(())
    }

    /// 获取配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// 上次加载时配置文件是否不存在而写入了默认配置
    pub fn created_default(&self) -> bool {
        self.created_default
    }

    pub fn config_file(&self) -> &Path {
        self.config_paths.config_file()
    }

    /// 校验配置并转换为运行时设置
    pub fn settings(
        &self,
    ) -> crate::app::error::types::Result<AppSettings> {
        AppSettings::try_from(&self.config)
    }
}
