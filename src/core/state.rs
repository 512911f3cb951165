//! 烘干机状态模块
//!
//! 保存烘干机的当前状态：程序、运行状态、温度、湿度、门状态、
//! 错误信息以及有限长度的事件历史。

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;

use super::program::DryingProgram;

/// 事件历史的最大条数
pub const MAX_EVENT_HISTORY: usize = 100;

/// 程序运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgramStatus {
    /// 待机
    #[default]
    Idle,
    /// 运行中
    Running,
    /// 程序结束后的冷却阶段
    Cooling,
    /// 故障
    Error,
    /// 门已打开
    DoorOpen,
}

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Info,
    Warning,
    Error,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Info => write!(f, "INFO"),
            EventType::Warning => write!(f, "WARNING"),
            EventType::Error => write!(f, "ERROR"),
        }
    }
}

/// 单条烘干机事件
#[derive(Debug, Clone)]
pub struct DryerEvent {
    pub event_type: EventType,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl DryerEvent {
    /// 以当前时间创建事件
    pub fn new(
        event_type: EventType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            message: message.into(),
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for DryerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.event_type,
            self.message
        )
    }
}

/// 烘干机状态
#[derive(Debug, Clone)]
pub struct DryerState {
    program: Option<DryingProgram>,
    status: ProgramStatus,
    remaining_secs: f64,
    temperature: f64,
    humidity: f64,
    door_closed: bool,
    door_locked: bool,
    error: Option<String>,
    events: VecDeque<DryerEvent>,
}

impl Default for DryerState {
    fn default() -> Self {
        Self {
            program: None,
            status: ProgramStatus::Idle,
            remaining_secs: 0.0,
            temperature: 0.0,
            humidity: 100.0,
            door_closed: true,
            door_locked: false,
            error: None,
            events: VecDeque::with_capacity(MAX_EVENT_HISTORY),
        }
    }
}

impl DryerState {
    /// 创建默认状态（待机、湿度100%、门关闭）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(&self) -> Option<DryingProgram> {
        self.program
    }

    pub fn set_program(&mut self, program: Option<DryingProgram>) {
        self.program = program;
    }

    /// 程序名称，未选择时为 "None"
    pub fn program_name(&self) -> &'static str {
        self.program.map_or("None", DryingProgram::key)
    }

    pub fn status(&self) -> ProgramStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ProgramStatus) {
        if self.status != status {
            tracing::debug!(
                "Status {:?} -> {:?}",
                self.status,
                status
            );
        }
        self.status = status;
    }

    /// 剩余时间（整秒，向上取整）
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_secs.max(0.0).ceil() as u32
    }

    pub fn set_remaining_seconds(&mut self, seconds: u32) {
        self.remaining_secs = f64::from(seconds);
    }

    /// 剩余时间（秒，含小数部分）
    pub fn remaining_secs_exact(&self) -> f64 {
        self.remaining_secs
    }

    pub fn set_remaining_secs_exact(&mut self, seconds: f64) {
        self.remaining_secs = seconds.max(0.0);
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn set_humidity(&mut self, humidity: f64) {
        self.humidity = humidity;
    }

    pub fn is_door_closed(&self) -> bool {
        self.door_closed
    }

    pub fn set_door_closed(&mut self, closed: bool) {
        self.door_closed = closed;
    }

    pub fn is_door_locked(&self) -> bool {
        self.door_locked
    }

    pub fn set_door_locked(&mut self, locked: bool) {
        self.door_locked = locked;
    }

    /// 当前错误信息
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 设置错误：记录错误事件并切换到故障状态
    pub fn set_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        self.log_event(EventType::Error, error.clone());
        self.set_status(ProgramStatus::Error);
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// 记录事件到历史，并同步输出到日志
    pub fn log_event(
        &mut self,
        event_type: EventType,
        message: impl Into<String>,
    ) {
        let event = DryerEvent::new(event_type, message);

        match event_type {
            EventType::Info => tracing::info!("{}", event.message),
            EventType::Warning => {
                tracing::warn!("{}", event.message)
            }
            EventType::Error => {
                tracing::error!("{}", event.message)
            }
        }

        if self.events.len() == MAX_EVENT_HISTORY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// 全部事件历史（旧的在前）
    pub fn events(&self) -> impl Iterator<Item = &DryerEvent> {
        self.events.iter()
    }

    /// 最近的 `count` 条事件（旧的在前）
    pub fn recent_events(&self, count: usize) -> Vec<DryerEvent> {
        let start = self.events.len().saturating_sub(count);
        self.events.iter().skip(start).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = DryerState::new();
        assert_eq!(state.status(), ProgramStatus::Idle);
        assert_eq!(state.remaining_seconds(), 0);
        assert_eq!(state.temperature(), 0.0);
        assert_eq!(state.humidity(), 100.0);
        assert!(state.is_door_closed());
        assert!(!state.is_door_locked());
        assert_eq!(state.program_name(), "None");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_event_history_is_bounded() {
        let mut state = DryerState::new();
        for i in 0..(MAX_EVENT_HISTORY + 5) {
            state.log_event(EventType::Info, format!("event {i}"));
        }
        assert_eq!(state.events().count(), MAX_EVENT_HISTORY);
        assert_eq!(
            state.events().next().map(|e| e.message.as_str()),
            Some("event 5")
        );
    }

    #[test]
    fn test_recent_events() {
        let mut state = DryerState::new();
        state.log_event(EventType::Info, "a");
        state.log_event(EventType::Warning, "b");
        state.log_event(EventType::Error, "c");

        let recent = state.recent_events(2);
        let messages: Vec<_> =
            recent.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert_eq!(state.recent_events(10).len(), 3);
    }

    #[test]
    fn test_set_error_switches_status() {
        let mut state = DryerState::new();
        state.set_error("boom");
        assert_eq!(state.status(), ProgramStatus::Error);
        assert_eq!(state.error(), Some("boom"));
        let last = state.recent_events(1);
        assert_eq!(last[0].event_type, EventType::Error);

        state.clear_error();
        assert!(state.error().is_none());
    }

    #[test]
    fn test_event_display_format() {
        let event = DryerEvent::new(EventType::Warning, "Door is open");
        let text = event.to_string();
        assert!(text.starts_with('['));
        assert!(text.ends_with("] WARNING: Door is open"));
    }
}
