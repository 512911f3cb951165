//! 配置管理模块
//!
//! 提供应用程序配置的加载、保存、校验和运行时设置转换

pub mod manager;
pub mod paths;
/// 运行时设置类型
pub mod types;
pub mod validator;
