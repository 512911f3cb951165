//! 显示格式化工具

use crate::core::state::ProgramStatus;

/// 把秒数格式化为 HH:MM:SS
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// 温度，保留一位小数
pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius:.1} °C")
}

/// 湿度，保留一位小数
pub fn format_humidity(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// 状态的德语显示文本
pub fn status_text(status: ProgramStatus) -> &'static str {
    match status {
        ProgramStatus::Idle => "Bereit",
        ProgramStatus::Running => "Läuft",
        ProgramStatus::Cooling => "Kühlt ab...",
        ProgramStatus::Error => "Fehler",
        ProgramStatus::DoorOpen => "Tür geöffnet",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(59), "00:00:59");
        assert_eq!(format_clock(2700), "00:45:00");
        assert_eq!(format_clock(3600), "01:00:00");
        assert_eq!(format_clock(3725), "01:02:05");
    }

    #[test]
    fn test_format_measurements() {
        assert_eq!(format_temperature(62.0), "62.0 °C");
        assert_eq!(format_humidity(55.0), "55.0%");
        assert_eq!(format_humidity(4.44), "4.4%");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(ProgramStatus::Idle), "Bereit");
        assert_eq!(status_text(ProgramStatus::Running), "Läuft");
        assert_eq!(status_text(ProgramStatus::Cooling), "Kühlt ab...");
        assert_eq!(status_text(ProgramStatus::Error), "Fehler");
        assert_eq!(status_text(ProgramStatus::DoorOpen), "Tür geöffnet");
    }
}
