//! 工具函数

pub mod helpers;
