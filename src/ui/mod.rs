//! UI模块 - 用户界面相关功能

pub mod app;
pub mod components;
pub mod config;
pub mod widgets;

pub use app::{run_gui, DryerApp};
