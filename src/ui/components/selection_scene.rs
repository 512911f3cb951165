//! 程序选择场景
//!
//! [`SelectionView`] 只依赖快照计算出界面上的文本和按钮状态，
//! 渲染函数只负责把它画出来。

use eframe::egui;

use crate::core::program::DryingProgram;
use crate::core::safety::OVERHEAT_THRESHOLD;
use crate::core::services::DryerSnapshot;
use crate::core::state::ProgramStatus;
use crate::utils::helpers::{format_humidity, format_temperature, status_text};

use super::app_renderer::UserAction;

pub const HEADLINE: &str = "Wähle ein Trockenprogramm:";
pub const LOAD_LAUNDRY_LABEL: &str = "Neue Wäsche einlegen";
pub const LAUNDRY_LOADED_TEXT: &str = "✓ Wäsche eingelegt";
pub const COOLING_DOOR_TEXT: &str = "Am abkühlen, bitte warten ...";
pub const ACKNOWLEDGE_LABEL: &str = "Fehler quittieren";

/// 程序按钮
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramButton {
    pub program: DryingProgram,
    pub label: &'static str,
    pub enabled: bool,
}

/// 选择场景的显示内容
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionView {
    pub programs: Vec<ProgramButton>,
    pub load_laundry_enabled: bool,
    pub laundry_confirmation: Option<&'static str>,
    pub door_text: String,
    pub door_button_label: &'static str,
    pub door_button_enabled: bool,
    pub status_text: String,
    pub temperature_text: String,
    pub humidity_text: String,
    pub error_text: Option<String>,
    pub acknowledge_enabled: bool,
}

impl SelectionView {
    pub fn from_snapshot(
        snapshot: &DryerSnapshot,
        laundry_confirmed: bool,
    ) -> Self {
        let programs_enabled = snapshot.door_closed
            && snapshot.status == ProgramStatus::Idle;

        let programs = DryingProgram::ALL
            .into_iter()
            .map(|program| ProgramButton {
                program,
                label: program.display_name(),
                enabled: programs_enabled,
            })
            .collect();

        let door_text = if snapshot.door_closed
            && !snapshot.is_safe_to_open()
        {
            COOLING_DOOR_TEXT.to_string()
        } else if snapshot.door_locked {
            "Tür: Verriegelt".to_string()
        } else if snapshot.door_closed {
            "Tür: Geschlossen".to_string()
        } else {
            "Tür: Geöffnet".to_string()
        };

        let (door_button_label, door_button_enabled) =
            if snapshot.door_closed {
                (
                    "Tür öffnen",
                    !snapshot.door_locked && snapshot.is_safe_to_open(),
                )
            } else {
                ("Tür schließen", true)
            };

        Self {
            programs,
            load_laundry_enabled: !snapshot.door_closed,
            laundry_confirmation: laundry_confirmed
                .then_some(LAUNDRY_LOADED_TEXT),
            door_text,
            door_button_label,
            door_button_enabled,
            status_text: format!(
                "Status: {}",
                status_text(snapshot.status)
            ),
            temperature_text: format!(
                "Temperatur: {}",
                format_temperature(snapshot.temperature)
            ),
            humidity_text: format!(
                "Restfeuchte: {}",
                format_humidity(snapshot.humidity)
            ),
            error_text: snapshot
                .error
                .as_ref()
                .map(|e| format!("Fehler: {e}")),
            acknowledge_enabled: snapshot.status == ProgramStatus::Error
                && snapshot.temperature < OVERHEAT_THRESHOLD,
        }
    }
}

/// 渲染选择场景，返回用户动作
pub fn render(ui: &mut egui::Ui, view: &SelectionView) -> UserAction {
    let mut action = UserAction::None;

    ui.heading(HEADLINE);
    ui.add_space(8.0);

    for button in &view.programs {
        let response = ui.add_enabled(
            button.enabled,
            egui::Button::new(button.label)
                .min_size(egui::vec2(ui.available_width(), 32.0)),
        );
        if response.clicked() {
            action = UserAction::StartProgram(button.program);
        }
    }

    ui.add_space(8.0);
    ui.separator();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                view.load_laundry_enabled,
                egui::Button::new(LOAD_LAUNDRY_LABEL),
            )
            .clicked()
        {
            action = UserAction::LoadLaundry;
        }
        if let Some(text) = view.laundry_confirmation {
            ui.colored_label(egui::Color32::GREEN, text);
        }
    });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                view.door_button_enabled,
                egui::Button::new(view.door_button_label),
            )
            .clicked()
        {
            action = UserAction::ToggleDoor;
        }
        ui.label(&view.door_text);
    });

    ui.add_space(4.0);
    egui::Grid::new("selection_status_grid")
        .num_columns(1)
        .spacing([20.0, 4.0])
        .show(ui, |ui| {
            ui.label(&view.status_text);
            ui.end_row();
            ui.label(&view.temperature_text);
            ui.end_row();
            ui.label(&view.humidity_text);
            ui.end_row();
        });

    if let Some(error) = &view.error_text {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::RED, error);
            if ui
                .add_enabled(
                    view.acknowledge_enabled,
                    egui::Button::new(ACKNOWLEDGE_LABEL),
                )
                .clicked()
            {
                action = UserAction::AcknowledgeError;
            }
        });
    }

    action
}
