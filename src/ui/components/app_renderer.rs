//! 应用渲染器模块
//!
//! 负责渲染状态栏、提示条和当前场景

use eframe::egui;

use crate::core::program::DryingProgram;
use crate::core::services::DryerSnapshot;
use crate::ui::config::{Notice, Scene};
use crate::ui::widgets::StatusBadge;

use super::event_log::render_event_log;
use super::running_scene::{self, RunningView};
use super::selection_scene::{self, SelectionView};

/// 用户动作枚举
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserAction {
    None,
    StartProgram(DryingProgram),
    Cancel,
    ToggleDoor,
    LoadLaundry,
    AcknowledgeError,
    DismissNotice,
}

/// 应用渲染器
pub struct AppRenderer;

impl AppRenderer {
    /// 渲染整个窗口，返回用户动作
    pub fn render(
        ctx: &egui::Context,
        scene: Scene,
        snapshot: &DryerSnapshot,
        notice: Option<&Notice>,
        laundry_confirmed: bool,
    ) -> UserAction {
        let mut action = UserAction::None;

        egui::TopBottomPanel::top("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                StatusBadge::new(snapshot.status, snapshot.heating_active)
                    .show(ui);
                if let Some(notice) = notice {
                    ui.add_space(4.0);
                    if Self::render_notice(ui, notice) {
                        action = UserAction::DismissNotice;
                    }
                }
                ui.add_space(6.0);
            });

        egui::TopBottomPanel::bottom("event_log_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                render_event_log(ui, &snapshot.recent_events);
                ui.add_space(4.0);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let scene_action = match scene {
                Scene::Selection => selection_scene::render(
                    ui,
                    &SelectionView::from_snapshot(
                        snapshot,
                        laundry_confirmed,
                    ),
                ),
                Scene::Running { program } => running_scene::render(
                    ui,
                    &RunningView::from_snapshot(program, snapshot),
                ),
            };
            if scene_action != UserAction::None {
                action = scene_action;
            }
        });

        action
    }

    /// 渲染提示条，返回是否点击了关闭
    fn render_notice(ui: &mut egui::Ui, notice: &Notice) -> bool {
        let color = if notice.is_error {
            egui::Color32::RED
        } else {
            egui::Color32::from_rgb(230, 160, 0)
        };

        let mut dismissed = false;
        ui.horizontal(|ui| {
            ui.colored_label(color, &notice.message);
            if ui.small_button("✕").clicked() {
                dismissed = true;
            }
        });
        dismissed
    }
}
