//! GUI 小部件模块

pub mod status;

pub use status::StatusBadge;
