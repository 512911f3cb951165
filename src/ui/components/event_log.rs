//! 事件日志面板

use egui;

use crate::core::state::{DryerEvent, EventType};

/// 事件类型对应的文字颜色
fn event_color(ui: &egui::Ui, event_type: EventType) -> egui::Color32 {
    match event_type {
        EventType::Info => ui.style().visuals.text_color(),
        EventType::Warning => egui::Color32::from_rgb(230, 160, 0),
        EventType::Error => egui::Color32::RED,
    }
}

/// 渲染可折叠的事件日志，最新的事件在最上面
pub fn render_event_log(ui: &mut egui::Ui, events: &[DryerEvent]) {
    egui::CollapsingHeader::new(format!("Ereignisprotokoll ({})", events.len()))
        .id_salt("event_log")
        .default_open(false)
        .show(ui, |ui| {
            if events.is_empty() {
                ui.label("Keine Ereignisse");
                return;
            }

            egui::ScrollArea::vertical()
                .max_height(120.0)
                .show(ui, |ui| {
                    for event in events.iter().rev() {
                        ui.colored_label(
                            event_color(ui, event.event_type),
                            egui::RichText::new(event.to_string())
                                .small()
                                .monospace(),
                        );
                    }
                });
        });
}
