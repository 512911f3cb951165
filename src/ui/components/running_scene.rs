//! 程序运行场景

use eframe::egui;

use crate::core::program::DryingProgram;
use crate::core::services::DryerSnapshot;
use crate::core::state::ProgramStatus;
use crate::utils::helpers::{
    format_clock, format_humidity, format_temperature, status_text,
};

use super::app_renderer::UserAction;

pub const CANCEL_LABEL: &str = "Abbrechen";

/// 运行场景的显示内容
#[derive(Debug, Clone, PartialEq)]
pub struct RunningView {
    pub program_text: String,
    pub status_text: String,
    pub remaining_text: String,
    pub humidity_text: String,
    pub temperature_text: String,
    /// 程序进度 0.0..=1.0
    pub progress: f32,
    /// 运行中停止程序，其余状态直接返回选择场景
    pub cancel_label: &'static str,
}

impl RunningView {
    pub fn from_snapshot(
        program: DryingProgram,
        snapshot: &DryerSnapshot,
    ) -> Self {
        let duration = program.profile().duration_secs.max(1);
        let progress = match snapshot.status {
            ProgramStatus::Running => {
                1.0 - snapshot.remaining_seconds as f32 / duration as f32
            }
            _ => 1.0,
        };

        Self {
            program_text: format!(
                "Programm: {}",
                program.display_name()
            ),
            status_text: format!(
                "Status: {}",
                status_text(snapshot.status)
            ),
            remaining_text: format!(
                "Restlaufzeit: {}",
                format_clock(u64::from(snapshot.remaining_seconds))
            ),
            humidity_text: format!(
                "Restfeuchte: {}",
                format_humidity(snapshot.humidity)
            ),
            temperature_text: format!(
                "Temperatur: {}",
                format_temperature(snapshot.temperature)
            ),
            progress: progress.clamp(0.0, 1.0),
            cancel_label: CANCEL_LABEL,
        }
    }
}

/// 渲染运行场景，返回用户动作
pub fn render(ui: &mut egui::Ui, view: &RunningView) -> UserAction {
    let mut action = UserAction::None;

    ui.heading(&view.program_text);
    ui.add_space(8.0);

    egui::Grid::new("running_status_grid")
        .num_columns(1)
        .spacing([20.0, 6.0])
        .show(ui, |ui| {
            ui.label(&view.status_text);
            ui.end_row();
            ui.label(&view.remaining_text);
            ui.end_row();
            ui.label(&view.humidity_text);
            ui.end_row();
            ui.label(&view.temperature_text);
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.add(egui::ProgressBar::new(view.progress).show_percentage());
    ui.add_space(12.0);

    if ui
        .add(
            egui::Button::new(view.cancel_label)
                .min_size(egui::vec2(ui.available_width(), 32.0)),
        )
        .clicked()
    {
        action = UserAction::Cancel;
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::types::SimulationSettings;
    use crate::core::services::ProgramManager;
    use std::time::Duration;

    #[test]
    fn test_running_view_labels() {
        let manager = ProgramManager::new(SimulationSettings::default());
        manager.start_program(DryingProgram::Cotton).unwrap();
        manager.with_simulation_mut(|sim| sim.set_humidity_decrease_rate(0.0));
        manager.advance(Duration::from_secs(10));

        let view = RunningView::from_snapshot(
            DryingProgram::Cotton,
            &manager.snapshot(),
        );

        assert_eq!(view.program_text, "Programm: Baumwolle");
        assert_eq!(view.status_text, "Status: Läuft");
        assert_eq!(view.remaining_text, "Restlaufzeit: 00:59:50");
        assert_eq!(view.humidity_text, "Restfeuchte: 100.0%");
        assert_eq!(view.temperature_text, "Temperatur: 20.0 °C");
        assert_eq!(view.cancel_label, "Abbrechen");
        assert!(view.progress > 0.0 && view.progress < 0.01);
    }

    #[test]
    fn test_cooling_view_keeps_cancel() {
        let manager = ProgramManager::new(SimulationSettings::default());
        manager.start_program(DryingProgram::Wool).unwrap();
        manager.with_simulation_mut(|sim| {
            sim.state_mut().set_temperature(45.0);
            sim.state_mut().set_humidity(5.0);
        });
        manager.advance(Duration::from_secs(1));

        let view = RunningView::from_snapshot(
            DryingProgram::Wool,
            &manager.snapshot(),
        );

        assert_eq!(view.status_text, "Status: Kühlt ab...");
        assert_eq!(view.remaining_text, "Restlaufzeit: 00:00:00");
        assert_eq!(view.cancel_label, CANCEL_LABEL);
        assert_eq!(view.progress, 1.0);
    }
}
