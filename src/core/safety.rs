//! 安全模块
//!
//! 负责门锁控制、开门温度检查和过热检测。所有检查都直接作用于
//! [`DryerState`]，并把结果记录为事件。

use crate::app::error::types::{DryerError, Result};

use super::state::{DryerState, EventType, ProgramStatus};

/// 过热阈值（°C）
pub const OVERHEAT_THRESHOLD: f64 = 100.0;
/// 允许开门的温度上限（°C）
pub const SAFE_DOOR_TEMPERATURE: f64 = 40.0;

/// 安全模块
pub struct SafetyModule;

impl SafetyModule {
    /// 只有门关着才允许运行
    pub fn is_operation_allowed(state: &mut DryerState) -> bool {
        let allowed = state.is_door_closed();
        if !allowed {
            state.log_event(
                EventType::Warning,
                "Operation not allowed: Door is open",
            );
        }
        allowed
    }

    /// 运行中，或冷却中且温度仍高于开门温度时，门应当上锁
    pub fn door_should_be_locked(state: &DryerState) -> bool {
        match state.status() {
            ProgramStatus::Running => true,
            ProgramStatus::Cooling => {
                state.temperature() > SAFE_DOOR_TEMPERATURE
            }
            _ => false,
        }
    }

    /// 根据当前状态更新门锁，仅在变化时记录事件
    pub fn update_door_lock(state: &mut DryerState) {
        let should_be_locked = Self::door_should_be_locked(state);
        let was_locked = state.is_door_locked();
        state.set_door_locked(should_be_locked);

        if should_be_locked && !was_locked {
            state.log_event(
                EventType::Info,
                "Door locked for program execution",
            );
        } else if !should_be_locked && was_locked {
            state.log_event(EventType::Info, "Door unlocked");
        }
    }

    /// 尝试开门：门未上锁且温度安全时才能打开
    pub fn try_open_door(state: &mut DryerState) -> Result<()> {
        if state.is_door_locked() {
            let err = DryerError::DoorLocked;
            state.log_event(EventType::Warning, err.to_string());
            return Err(err);
        }

        if !Self::is_safe_to_open(state) {
            let err = DryerError::DoorTooHot {
                temperature: state.temperature(),
            };
            state.log_event(EventType::Warning, err.to_string());
            return Err(err);
        }

        state.set_door_closed(false);
        if state.status() != ProgramStatus::Error {
            state.set_status(ProgramStatus::DoorOpen);
        }
        state.log_event(EventType::Info, "Door opened");
        Ok(())
    }

    /// 关门，DoorOpen 状态回到待机
    pub fn close_door(state: &mut DryerState) {
        state.set_door_closed(true);
        if state.status() == ProgramStatus::DoorOpen {
            state.set_status(ProgramStatus::Idle);
        }
        state.log_event(EventType::Info, "Door closed");
    }

    pub fn is_safe_to_open(state: &DryerState) -> bool {
        state.temperature() < SAFE_DOOR_TEMPERATURE
    }

    /// 过热检测，过热时切换到故障状态
    pub fn check_overheating(state: &mut DryerState) -> bool {
        let overheating = state.temperature() >= OVERHEAT_THRESHOLD;
        if overheating {
            state.set_error(format!(
                "Overheating detected! Temperature: {:.1}",
                state.temperature()
            ));
        }
        overheating
    }
}
