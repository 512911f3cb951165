//! 服务层 - 程序管理和命令行运行器

pub mod console_runner;
pub mod program_manager;

pub use program_manager::{DryerSnapshot, ProgramManager, TickerHandle};
