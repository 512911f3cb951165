//! 应用层 - 配置、日志和错误处理

pub mod config;
pub mod error;
pub mod logging;
