//! 洗衣烘干机模拟库
//!
//! 模拟一台家用烘干机：选择烘干程序后加热滚筒、降低衣物湿度、
//! 根据烘干速率估算剩余时间，程序结束后冷却，并通过门锁保证安全。
//!
//! ## 功能特性
//!
//! - 三种烘干程序（棉、合成纤维、羊毛）
//! - 门锁与过热保护
//! - 后台定时推进的模拟器
//! - egui 图形界面和命令行运行模式
//! - TOML 配置文件和按会话滚动的日志文件
//!
//! ## 使用示例
//!
//! ```no_run
//! use std::time::Duration;
//! use cloth_dryer::app::config::types::SimulationSettings;
//! use cloth_dryer::{DryingProgram, ProgramManager};
//!
//! let manager = ProgramManager::new(SimulationSettings::default());
//! manager.start_program(DryingProgram::Cotton)?;
//! manager.advance(Duration::from_secs(60));
//!
//! let snapshot = manager.snapshot();
//! println!("{:.1}% humidity left", snapshot.humidity);
//! # Ok::<(), cloth_dryer::DryerError>(())
//! ```

pub mod app;
pub mod core;
pub mod ui;
pub mod utils;

// 重新导出主要功能
pub use app::error::types::{DryerError, Result};
pub use core::program::DryingProgram;
pub use core::services::ProgramManager;
pub use core::simulation::DryerSimulation;
pub use core::state::{DryerState, ProgramStatus};
