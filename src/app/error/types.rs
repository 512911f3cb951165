use std::io;
use thiserror::Error;

use crate::core::state::ProgramStatus;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum DryerError {
    /// 文件系统错误
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 配置错误
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// 验证错误
    #[error("Validation failed: {field} - {message}")]
    Validation { field: String, message: String },

    /// GUI 相关错误
    #[error("GUI error: {0}")]
    Gui(String),

    /// 运行时错误
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// 未知的烘干程序
    #[error("Unknown drying program: {0}")]
    UnknownProgram(String),

    /// 门开着，不允许运行
    #[error("Operation not allowed: Door is open")]
    DoorOpen,

    /// 门关着，不能放入衣物
    #[error("Cannot load new laundry while door is closed")]
    DoorClosed,

    /// 门已上锁
    #[error("Cannot open door: Door is locked")]
    DoorLocked,

    /// 温度过高，不能开门
    #[error("Cannot open door: Temperature too high ({temperature:.1}°C)")]
    DoorTooHot { temperature: f64 },

    /// 当前状态下不能启动程序
    #[error("A program cannot be started while the dryer is {status:?}")]
    ProgramActive { status: ProgramStatus },
}

impl From<anyhow::Error> for DryerError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(io_error) =
            err.downcast_ref::<std::io::Error>()
        {
            return DryerError::Io(std::io::Error::new(
                io_error.kind(),
                err.to_string(),
            ));
        }
        DryerError::config(err.to_string())
    }
}

impl DryerError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 是否为用户操作被安全逻辑拒绝（而非系统故障）
    pub fn is_rejected_operation(&self) -> bool {
        matches!(
            self,
            Self::DoorOpen
                | Self::DoorClosed
                | Self::DoorLocked
                | Self::DoorTooHot { .. }
                | Self::ProgramActive { .. }
        )
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, DryerError>;
pub type AppError = DryerError;
