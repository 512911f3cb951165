//! 配置路径管理模块
//! 负责处理程序根目录下的配置文件路径

use crate::app::error::types::{DryerError, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// 配置路径管理器
pub struct ConfigPaths {
    config_file: PathBuf,
}

impl ConfigPaths {
    /// 创建新的配置路径管理器
    ///
    /// 优先使用工作目录下的 `config.toml`，其次是可执行文件所在目录。
    pub fn new() -> Result<Self> {
        let config_file = Self::get_root_config_file()?;

        Ok(Self { config_file })
    }

    /// 使用指定的配置文件路径
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_file: path.into(),
        }
    }

    /// 获取配置文件路径
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// 确保配置文件所在目录存在
    pub fn ensure_config_dir_exists(&self) -> Result<()> {
        if let Some(dir) = self.config_file.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
                tracing::debug!("Created config directory: {:?}", dir);
            }
        }
        Ok(())
    }

    fn get_root_config_file() -> Result<PathBuf> {
        let current_dir = std::env::current_dir().map_err(|e| {
            DryerError::config(format!(
                "Failed to get current directory: {}",
                e
            ))
        })?;

        let config_file = current_dir.join(CONFIG_FILE_NAME);

        if !config_file.exists() {
            if let Ok(exe_path) = std::env::current_exe() {
                if let Some(exe_dir) = exe_path.parent() {
                    let exe_config_file = exe_dir.join(CONFIG_FILE_NAME);
                    if exe_config_file.exists() {
                        tracing::info!(
                            "Found config file in executable directory: {:?}",
                            exe_config_file
                        );
                        return Ok(exe_config_file);
                    }
                }
            }
        }

        tracing::info!("Using config file path: {:?}", config_file);
        Ok(config_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let paths = ConfigPaths::new().unwrap();
        assert!(paths
            .config_file()
            .to_string_lossy()
            .ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_ensure_dir_creates_parent() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let file = temp_dir.path().join("nested/dir/config.toml");
        let paths = ConfigPaths::from_file(&file);

        paths.ensure_config_dir_exists().unwrap();

        assert!(file.parent().unwrap().is_dir());
    }
}
