//! 烘干过程模拟
//!
//! 按时间步推进温度、湿度和剩余时间，并与 [`SafetyModule`] 配合完成
//! 门锁、过热和冷却逻辑。模拟使用自己的时钟，同样的输入总是得到
//! 同样的结果。

use std::time::Duration;

use crate::app::error::types::{DryerError, Result};

use super::program::DryingProgram;
use super::safety::{SafetyModule, OVERHEAT_THRESHOLD, SAFE_DOOR_TEMPERATURE};
use super::state::{DryerState, EventType, ProgramStatus};

/// 加热速率（°C/秒）
pub const TEMP_INCREASE_RATE: f64 = 2.0;
/// 自然降温速率（°C/秒）
pub const TEMP_DECREASE_RATE: f64 = 0.8;
/// 冷却阶段的强制降温速率（°C/秒）
pub const TEMP_COOLING_RATE: f64 = 3.0;
/// 湿度降到该值时程序结束（%）
pub const TARGET_HUMIDITY: f64 = 5.0;
/// 根据烘干速率估算的剩余时间下限（秒）
const MIN_ESTIMATE_SECS: f64 = 5.0;

/// 上一次剩余时间估算时的采样
#[derive(Debug, Clone, Copy)]
struct HumiditySample {
    clock_secs: f64,
    humidity: f64,
}

/// 烘干模拟器
#[derive(Debug, Clone)]
pub struct DryerSimulation {
    state: DryerState,
    heating_active: bool,
    humidity_decrease_rate: f64,
    target_temperature: f64,
    program_duration_secs: u32,
    clock_secs: f64,
    last_sample: Option<HumiditySample>,
}

impl Default for DryerSimulation {
    fn default() -> Self {
        Self::new(DryerState::new())
    }
}

impl DryerSimulation {
    /// 基于给定状态创建模拟器
    pub fn new(state: DryerState) -> Self {
        Self {
            state,
            heating_active: false,
            humidity_decrease_rate: 0.0,
            target_temperature: 0.0,
            program_duration_secs: 0,
            clock_secs: 0.0,
            last_sample: None,
        }
    }

    pub fn state(&self) -> &DryerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DryerState {
        &mut self.state
    }

    /// 模拟时钟（秒）
    pub fn clock_secs(&self) -> f64 {
        self.clock_secs
    }

    /// 启动烘干程序，门必须关着
    pub fn start_program(
        &mut self,
        program: DryingProgram,
    ) -> Result<()> {
        if !SafetyModule::is_operation_allowed(&mut self.state) {
            return Err(DryerError::DoorOpen);
        }

        self.configure_program(program);
        self.state.clear_error();
        self.state.set_status(ProgramStatus::Running);
        SafetyModule::update_door_lock(&mut self.state);

        self.state.log_event(
            EventType::Info,
            format!("{} program started", program.key()),
        );
        Ok(())
    }

    /// 停止当前程序，回到待机
    pub fn stop_program(&mut self) {
        self.heating_active = false;
        self.state.set_status(ProgramStatus::Idle);
        self.state.set_remaining_seconds(0);
        self.last_sample = None;
        SafetyModule::update_door_lock(&mut self.state);

        self.state.log_event(EventType::Info, "Program stopped");
    }

    fn configure_program(&mut self, program: DryingProgram) {
        let profile = program.profile();
        self.humidity_decrease_rate = profile.humidity_decrease_rate;
        self.target_temperature = profile.target_temperature;
        self.program_duration_secs = profile.duration_secs;
        self.state.set_remaining_seconds(profile.duration_secs);
        self.state.set_program(Some(program));
        self.heating_active = true;
        self.last_sample = Some(HumiditySample {
            clock_secs: self.clock_secs,
            humidity: self.state.humidity(),
        });
    }

    /// 推进模拟
    pub fn update_state(&mut self, elapsed: Duration) {
        let elapsed_secs = elapsed.as_secs_f64();
        self.clock_secs += elapsed_secs;

        if !matches!(self.state.status(), ProgramStatus::Running) {
            self.heating_active = false;
        }

        self.update_temperature(elapsed_secs);

        match self.state.status() {
            ProgramStatus::Running => {
                self.update_humidity(elapsed_secs);
                self.update_remaining_time(elapsed_secs);

                if SafetyModule::check_overheating(&mut self.state) {
                    self.heating_active = false;
                } else if self.is_program_finished() {
                    self.finish_program();
                }
            }
            ProgramStatus::Cooling => {
                if self.state.temperature() <= SAFE_DOOR_TEMPERATURE {
                    self.state.set_status(ProgramStatus::Idle);
                    self.state
                        .log_event(EventType::Info, "Cooling finished");
                }
            }
            ProgramStatus::Idle
            | ProgramStatus::Error
            | ProgramStatus::DoorOpen => {}
        }

        SafetyModule::update_door_lock(&mut self.state);
    }

    fn update_temperature(&mut self, elapsed_secs: f64) {
        let current = self.state.temperature();

        if self.heating_active {
            if current < self.target_temperature {
                let heated = current + TEMP_INCREASE_RATE * elapsed_secs;
                self.state
                    .set_temperature(heated.min(self.target_temperature));
            }
        } else if current > 0.0 {
            let rate = if self.state.status() == ProgramStatus::Cooling
            {
                TEMP_COOLING_RATE
            } else {
                TEMP_DECREASE_RATE
            };
            self.state
                .set_temperature((current - rate * elapsed_secs).max(0.0));
        }
    }

    fn update_humidity(&mut self, elapsed_secs: f64) {
        let current = self.state.humidity();
        if self.heating_active && current > 0.0 {
            let dried =
                current - self.humidity_decrease_rate * elapsed_secs;
            self.state.set_humidity(dried.max(0.0));
        }
    }

    /// 剩余时间：按程序时长倒计时，若观察到的烘干速率表明更早
    /// 结束，则取估算值
    fn update_remaining_time(&mut self, elapsed_secs: f64) {
        let humidity = self.state.humidity();
        let mut remaining =
            (self.state.remaining_secs_exact() - elapsed_secs).max(0.0);

        if let Some(sample) = self.last_sample {
            let time_delta = self.clock_secs - sample.clock_secs;
            let drying_rate = if time_delta > 0.0 {
                (sample.humidity - humidity) / time_delta
            } else {
                0.0
            };

            if drying_rate > 0.0 {
                let estimate = ((humidity - TARGET_HUMIDITY)
                    / drying_rate)
                    .max(MIN_ESTIMATE_SECS)
                    .min(f64::from(self.program_duration_secs));
                remaining = remaining.min(estimate);
            }
        }

        self.last_sample = Some(HumiditySample {
            clock_secs: self.clock_secs,
            humidity,
        });
        self.state.set_remaining_secs_exact(remaining);
    }

    fn is_program_finished(&self) -> bool {
        self.state.humidity() <= TARGET_HUMIDITY
            || self.state.remaining_secs_exact() <= 0.0
    }

    fn finish_program(&mut self) {
        self.heating_active = false;
        self.last_sample = None;
        self.state.set_remaining_seconds(0);
        self.state.set_status(ProgramStatus::Cooling);
        self.state.log_event(
            EventType::Info,
            format!(
                "{} program finished, cooling down",
                self.state.program_name()
            ),
        );
    }

    pub fn try_open_door(&mut self) -> Result<()> {
        SafetyModule::try_open_door(&mut self.state)
    }

    pub fn close_door(&mut self) {
        SafetyModule::close_door(&mut self.state);
    }

    pub fn is_door_locked(&self) -> bool {
        self.state.is_door_locked()
    }

    pub fn is_door_closed(&self) -> bool {
        self.state.is_door_closed()
    }

    pub fn is_safe_to_open(&self) -> bool {
        SafetyModule::is_safe_to_open(&self.state)
    }

    pub fn is_heating_active(&self) -> bool {
        self.heating_active
    }

    pub fn set_heating_active(&mut self, active: bool) {
        self.heating_active = active;
    }

    /// 覆盖当前程序的湿度下降速率
    pub fn set_humidity_decrease_rate(&mut self, rate: f64) {
        self.humidity_decrease_rate = rate;
    }

    /// 放入新衣物，只能在门打开时进行
    pub fn load_new_laundry(&mut self) -> Result<()> {
        if self.state.is_door_closed() {
            let err = DryerError::DoorClosed;
            self.state.log_event(EventType::Warning, err.to_string());
            return Err(err);
        }

        self.state.set_humidity(100.0);
        self.state.log_event(EventType::Info, "New laundry loaded");
        Ok(())
    }

    /// 确认故障。温度仍在过热阈值以上时不能确认
    pub fn acknowledge_error(&mut self) -> bool {
        if self.state.status() != ProgramStatus::Error
            || self.state.temperature() >= OVERHEAT_THRESHOLD
        {
            return false;
        }

        self.state.clear_error();
        self.state.set_remaining_seconds(0);
        let status = if self.state.is_door_closed() {
            ProgramStatus::Idle
        } else {
            ProgramStatus::DoorOpen
        };
        self.state.set_status(status);
        SafetyModule::update_door_lock(&mut self.state);
        self.state.log_event(EventType::Info, "Error acknowledged");
        true
    }
}
