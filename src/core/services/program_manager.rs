//! 程序管理服务
//!
//! 负责在后台周期性推进模拟，处理程序启停、门操作，并为界面提供
//! 当前状态的快照。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::config::types::SimulationSettings;
use crate::app::error::types::{DryerError, Result};
use crate::core::program::DryingProgram;
use crate::core::safety::SAFE_DOOR_TEMPERATURE;
use crate::core::simulation::DryerSimulation;
use crate::core::state::{DryerEvent, ProgramStatus};

/// 快照中携带的最近事件条数
const SNAPSHOT_EVENT_COUNT: usize = 20;

/// 界面使用的状态快照
#[derive(Debug, Clone)]
pub struct DryerSnapshot {
    pub program: Option<DryingProgram>,
    pub status: ProgramStatus,
    pub remaining_seconds: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub door_closed: bool,
    pub door_locked: bool,
    pub heating_active: bool,
    pub error: Option<String>,
    pub recent_events: Vec<DryerEvent>,
}

impl DryerSnapshot {
    fn capture(simulation: &DryerSimulation) -> Self {
        let state = simulation.state();
        Self {
            program: state.program(),
            status: state.status(),
            remaining_seconds: state.remaining_seconds(),
            temperature: state.temperature(),
            humidity: state.humidity(),
            door_closed: state.is_door_closed(),
            door_locked: state.is_door_locked(),
            heating_active: simulation.is_heating_active(),
            error: state.error().map(str::to_string),
            recent_events: state.recent_events(SNAPSHOT_EVENT_COUNT),
        }
    }

    /// 温度是否低于开门温度
    pub fn is_safe_to_open(&self) -> bool {
        self.temperature < SAFE_DOOR_TEMPERATURE
    }
}

struct ManagerInner {
    simulation: DryerSimulation,
    last_update: Instant,
}

/// 程序管理器
///
/// 可以廉价克隆，所有克隆共享同一台烘干机。
#[derive(Clone)]
pub struct ProgramManager {
    inner: Arc<Mutex<ManagerInner>>,
    settings: SimulationSettings,
}

impl ProgramManager {
    /// 创建新的程序管理器
    pub fn new(settings: SimulationSettings) -> Self {
        Self::with_simulation(DryerSimulation::default(), settings)
    }

    /// 使用已有的模拟器创建程序管理器
    pub fn with_simulation(
        simulation: DryerSimulation,
        settings: SimulationSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManagerInner {
                simulation,
                last_update: Instant::now(),
            })),
            settings,
        }
    }

    pub fn settings(&self) -> SimulationSettings {
        self.settings
    }

    fn lock(&self) -> MutexGuard<'_, ManagerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 启动烘干程序，仅在待机时允许
    pub fn start_program(&self, program: DryingProgram) -> Result<()> {
        let mut inner = self.lock();
        let status = inner.simulation.state().status();
        if !matches!(status, ProgramStatus::Idle | ProgramStatus::DoorOpen)
        {
            tracing::warn!(
                "Ignoring start of {} while {:?}",
                program,
                status
            );
            return Err(DryerError::ProgramActive { status });
        }

        inner.simulation.start_program(program)?;
        inner.last_update = Instant::now();
        Ok(())
    }

    /// 停止正在运行的程序，返回是否真的停止了
    pub fn stop_program(&self) -> bool {
        let mut inner = self.lock();
        if inner.simulation.state().status() == ProgramStatus::Running {
            inner.simulation.stop_program();
            true
        } else {
            false
        }
    }

    pub fn try_open_door(&self) -> Result<()> {
        self.lock().simulation.try_open_door()
    }

    pub fn close_door(&self) {
        self.lock().simulation.close_door();
    }

    pub fn is_door_locked(&self) -> bool {
        self.lock().simulation.is_door_locked()
    }

    pub fn is_door_closed(&self) -> bool {
        self.lock().simulation.is_door_closed()
    }

    /// 放入新衣物，门必须打开
    pub fn load_new_laundry(&self) -> Result<()> {
        self.lock().simulation.load_new_laundry()
    }

    pub fn acknowledge_error(&self) -> bool {
        self.lock().simulation.acknowledge_error()
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> DryerSnapshot {
        DryerSnapshot::capture(&self.lock().simulation)
    }

    /// 直接访问模拟器
    pub fn with_simulation_mut<R>(
        &self,
        f: impl FnOnce(&mut DryerSimulation) -> R,
    ) -> R {
        f(&mut self.lock().simulation)
    }

    /// 按给定的模拟时长推进
    pub fn advance(&self, elapsed: Duration) {
        let mut inner = self.lock();
        inner.simulation.update_state(elapsed);
        inner.last_update = Instant::now();
    }

    /// 按距离上次刷新的真实时间（乘以时间倍率）推进
    pub fn refresh_state(&self) {
        let mut inner = self.lock();
        let now = Instant::now();
        let elapsed = now.duration_since(inner.last_update);
        inner.last_update = now;
        inner
            .simulation
            .update_state(elapsed.mul_f64(self.settings.time_scale));
    }

    /// 在给定运行时中启动后台刷新任务
    pub fn spawn_ticker(
        &self,
        runtime_handle: &tokio::runtime::Handle,
    ) -> TickerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = self.clone();
        let tick_interval = self.settings.tick_interval;

        let task = runtime_handle.spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // 第一次 tick 立即完成
            interval.tick().await;
            manager.lock().last_update = Instant::now();

            tracing::debug!(
                "Simulation ticker started ({:?})",
                tick_interval
            );

            loop {
                tokio::select! {
                    _ = interval.tick() => manager.refresh_state(),
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::debug!("Simulation ticker stopped");
        });

        TickerHandle { shutdown_tx, task }
    }
}

/// 后台刷新任务句柄
pub struct TickerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// 通知后台任务停止
    pub fn stop(&self) {
        // 任务可能已经退出
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// 停止并等待后台任务结束
    pub async fn shutdown(self) -> Result<()> {
        self.stop();
        self.task
            .await
            .map_err(|e| DryerError::Runtime(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ProgramManager {
        ProgramManager::new(SimulationSettings::default())
    }

    #[test]
    fn test_start_only_from_idle() {
        let manager = manager();
        manager.start_program(DryingProgram::Cotton).unwrap();

        let result = manager.start_program(DryingProgram::Wool);

        assert!(matches!(
            result,
            Err(DryerError::ProgramActive {
                status: ProgramStatus::Running
            })
        ));
        assert_eq!(
            manager.snapshot().program,
            Some(DryingProgram::Cotton)
        );
    }

    #[test]
    fn test_start_with_open_door_is_rejected() {
        let manager = manager();
        manager.try_open_door().unwrap();

        assert!(matches!(
            manager.start_program(DryingProgram::Cotton),
            Err(DryerError::DoorOpen)
        ));
    }

    #[test]
    fn test_stop_only_while_running() {
        let manager = manager();
        assert!(!manager.stop_program());

        manager.start_program(DryingProgram::Synthetic).unwrap();
        assert!(manager.stop_program());
        assert_eq!(manager.snapshot().status, ProgramStatus::Idle);
    }

    #[test]
    fn test_load_laundry_requires_open_door() {
        let manager = manager();
        assert!(manager.load_new_laundry().is_err());

        manager.try_open_door().unwrap();
        assert!(!manager.is_door_closed());
        assert!(manager.load_new_laundry().is_ok());

        manager.close_door();
        assert!(manager.is_door_closed());
        assert_eq!(manager.snapshot().status, ProgramStatus::Idle);
    }

    #[test]
    fn test_snapshot_reflects_running_program() {
        let manager = manager();
        manager.start_program(DryingProgram::Wool).unwrap();
        manager.advance(Duration::from_secs(10));

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.status, ProgramStatus::Running);
        assert!(snapshot.door_locked);
        assert!(snapshot.heating_active);
        assert_eq!(snapshot.temperature, 20.0);
        assert!(snapshot.humidity < 100.0);
        assert!(!snapshot.recent_events.is_empty());
        assert!(snapshot.is_safe_to_open());
    }

    #[test]
    fn test_clones_share_state() {
        let manager = manager();
        let other = manager.clone();

        other.start_program(DryingProgram::Cotton).unwrap();

        assert!(manager.is_door_locked());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let manager = manager();
        let other = manager.clone();

        let result = std::panic::catch_unwind(
            std::panic::AssertUnwindSafe(|| {
                other.with_simulation_mut(|_| panic!("tick failed"));
            }),
        );

        assert!(result.is_err());
        assert!(manager.inner.is_poisoned());
        assert_eq!(manager.snapshot().status, ProgramStatus::Idle);
        assert!(manager.start_program(DryingProgram::Wool).is_ok());
    }

    #[tokio::test]
    async fn test_ticker_advances_simulation() {
        let manager = ProgramManager::new(SimulationSettings {
            tick_interval: Duration::from_millis(10),
            time_scale: 100.0,
        });
        manager.start_program(DryingProgram::Cotton).unwrap();

        let ticker =
            manager.spawn_ticker(&tokio::runtime::Handle::current());
        tokio::time::sleep(Duration::from_millis(100)).await;
        ticker.shutdown().await.unwrap();

        let snapshot = manager.snapshot();
        assert!(snapshot.temperature > 0.0);
        assert!(snapshot.humidity < 100.0);
    }

    #[tokio::test]
    async fn test_ticker_stops_on_request() {
        let manager = manager();
        let ticker =
            manager.spawn_ticker(&tokio::runtime::Handle::current());

        ticker.stop();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(ticker.is_finished());
    }
}
