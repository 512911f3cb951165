//! GUI组件模块 - 包含各场景和面板的实现

pub mod app_renderer;
pub mod event_log;
pub mod running_scene;
pub mod selection_scene;

// 重新导出主要组件
pub use app_renderer::{AppRenderer, UserAction};
pub use running_scene::RunningView;
pub use selection_scene::SelectionView;
