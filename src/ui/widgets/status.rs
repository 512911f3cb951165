//! 状态相关组件
//!
//! 带颜色圆点的状态指示器。

use eframe::egui;

use crate::core::state::ProgramStatus;
use crate::utils::helpers::status_text;

/// 状态对应的指示灯颜色
pub fn status_color(status: ProgramStatus) -> egui::Color32 {
    match status {
        ProgramStatus::Idle => egui::Color32::GRAY,
        ProgramStatus::Running => egui::Color32::GREEN,
        ProgramStatus::Cooling => egui::Color32::LIGHT_BLUE,
        ProgramStatus::Error => egui::Color32::RED,
        ProgramStatus::DoorOpen => egui::Color32::YELLOW,
    }
}

/// 状态指示器
/// 左侧显示状态文本，右侧显示状态圆点
pub struct StatusBadge {
    status: ProgramStatus,
    heating: bool,
}

impl StatusBadge {
    /// 创建新的状态指示器
    pub fn new(status: ProgramStatus, heating: bool) -> Self {
        Self { status, heating }
    }

    fn label(&self) -> String {
        if self.heating {
            format!("{} (Heizung an)", status_text(self.status))
        } else {
            status_text(self.status).to_string()
        }
    }

    /// 渲染状态指示器
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let size = egui::Vec2::new(ui.available_width(), 28.0);
        let (rect, response) =
            ui.allocate_exact_size(size, egui::Sense::hover());

        ui.painter().rect_filled(
            rect,
            4.0,
            ui.style().visuals.faint_bg_color,
        );
        ui.painter().rect_stroke(
            rect,
            4.0,
            egui::Stroke::new(
                1.0,
                ui.style().visuals.window_stroke.color,
            ),
        );

        ui.painter().text(
            rect.left_center() + egui::Vec2::new(8.0, 0.0),
            egui::Align2::LEFT_CENTER,
            self.label(),
            ui.style().text_styles[&egui::TextStyle::Button]
                .clone(),
            ui.style().visuals.text_color(),
        );

        // 绘制状态指示圆点
        let dot_radius = 5.0;
        let dot_pos = egui::pos2(
            rect.right() - dot_radius - 8.0,
            rect.center().y,
        );
        ui.painter().circle_filled(
            dot_pos,
            dot_radius,
            status_color(self.status),
        );

        response
    }
}
