//! 核心模块 - 烘干机状态、安全逻辑和模拟

pub mod program;
pub mod safety;
pub mod services;
pub mod simulation;
pub mod state;
