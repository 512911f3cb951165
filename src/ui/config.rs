//! GUI配置模块
//!
//! 定义界面场景和用户提示。

use crate::core::program::DryingProgram;

/// 当前显示的场景
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    /// 程序选择
    #[default]
    Selection,
    /// 程序运行中
    Running { program: DryingProgram },
}

impl Scene {
    pub fn is_running(&self) -> bool {
        matches!(self, Scene::Running { .. })
    }
}

/// 操作被拒绝时显示的提示
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}
