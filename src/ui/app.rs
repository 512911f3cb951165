//! GUI主应用程序模块

use std::time::{Duration, Instant};

use eframe::egui;

use crate::app::config::types::UiSettings;
use crate::app::error::types::{AppError, DryerError, Result};
use crate::core::services::{DryerSnapshot, ProgramManager, TickerHandle};
use crate::core::state::ProgramStatus;

use super::components::{AppRenderer, UserAction};
use super::config::{Notice, Scene};

/// 窗口标题
pub const WINDOW_TITLE: &str = "Wäschetrockner";

/// GUI 应用程序
pub struct DryerApp {
    manager: ProgramManager,
    settings: UiSettings,
    scene: Scene,
    snapshot: DryerSnapshot,
    notice: Option<Notice>,
    // 运行场景结束后返回选择场景的时间点
    return_at: Option<Instant>,
    laundry_confirmed_until: Option<Instant>,
    ticker: Option<TickerHandle>,
}

impl DryerApp {
    /// 创建应用，不启动后台刷新任务
    pub fn new(manager: ProgramManager, settings: UiSettings) -> Self {
        let snapshot = manager.snapshot();
        Self {
            manager,
            settings,
            scene: Scene::Selection,
            snapshot,
            notice: None,
            return_at: None,
            laundry_confirmed_until: None,
            ticker: None,
        }
    }

    /// 绑定后台刷新任务，退出时停止
    pub fn with_ticker(mut self, ticker: TickerHandle) -> Self {
        self.ticker = Some(ticker);
        self
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn snapshot(&self) -> &DryerSnapshot {
        &self.snapshot
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 是否显示“已放入衣物”提示
    pub fn is_laundry_confirmed(&self, now: Instant) -> bool {
        self.laundry_confirmed_until
            .is_some_and(|until| now < until)
    }

    /// 读取最新快照并处理场景切换
    pub fn refresh(&mut self, now: Instant) {
        self.snapshot = self.manager.snapshot();

        if self
            .laundry_confirmed_until
            .is_some_and(|until| now >= until)
        {
            self.laundry_confirmed_until = None;
        }

        if !self.scene.is_running() {
            return;
        }

        match self.snapshot.status {
            ProgramStatus::Idle | ProgramStatus::Error => {
                let delay = self.settings.return_delay;
                let return_at = *self
                    .return_at
                    .get_or_insert_with(|| deadline(now, delay));
                if now >= return_at {
                    tracing::debug!("Returning to program selection");
                    self.scene = Scene::Selection;
                    self.return_at = None;
                }
            }
            _ => self.return_at = None,
        }
    }

    /// 处理用户动作
    pub fn handle_action(&mut self, action: UserAction, now: Instant) {
        let result = match action {
            UserAction::None => return,
            UserAction::DismissNotice => {
                self.notice = None;
                return;
            }
            UserAction::StartProgram(program) => {
                self.manager.start_program(program).map(|()| {
                    self.scene = Scene::Running { program };
                    self.return_at = None;
                })
            }
            UserAction::Cancel => {
                self.manager.stop_program();
                self.scene = Scene::Selection;
                self.return_at = None;
                Ok(())
            }
            UserAction::ToggleDoor => {
                if self.manager.is_door_closed() {
                    self.manager.try_open_door()
                } else {
                    self.manager.close_door();
                    Ok(())
                }
            }
            UserAction::LoadLaundry => {
                self.manager.load_new_laundry().map(|()| {
                    self.laundry_confirmed_until = Some(deadline(
                        now,
                        self.settings.laundry_confirmation,
                    ));
                })
            }
            UserAction::AcknowledgeError => {
                if self.manager.acknowledge_error() {
                    Ok(())
                } else {
                    Err(DryerError::Runtime(
                        "Error cannot be acknowledged yet".to_string(),
                    ))
                }
            }
        };

        match result {
            Ok(()) => self.notice = None,
            Err(e) => self.report(e),
        }

        self.snapshot = self.manager.snapshot();
    }

    fn report(&mut self, error: AppError) {
        if error.is_rejected_operation() {
            tracing::warn!("Operation rejected: {}", error);
            self.notice = Some(Notice::warning(error.to_string()));
        } else {
            tracing::error!("Operation failed: {}", error);
            self.notice = Some(Notice::error(error.to_string()));
        }
    }

    /// 渲染一帧
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.refresh(now);

        let action = AppRenderer::render(
            ctx,
            self.scene,
            &self.snapshot,
            self.notice.as_ref(),
            self.is_laundry_confirmed(now),
        );
        self.handle_action(action, now);

        // 定期刷新界面以更新温度、湿度和剩余时间
        ctx.request_repaint_after(self.settings.refresh_interval);
    }
}

impl eframe::App for DryerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(ticker) = &self.ticker {
            ticker.stop();
        }
        tracing::info!("GUI closed");
    }
}

/// 计算截止时间，溢出时立即到期
fn deadline(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay).unwrap_or(now)
}

/// 启动 GUI 应用程序，阻塞直到窗口关闭
pub fn run_gui(
    manager: ProgramManager,
    settings: UiSettings,
    ticker: TickerHandle,
) -> Result<()> {
    let viewport_builder = egui::ViewportBuilder::default()
        .with_inner_size(settings.window_size)
        .with_min_inner_size(settings.window_size)
        .with_resizable(true)
        .with_title(WINDOW_TITLE);

    let options = eframe::NativeOptions {
        viewport: viewport_builder,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    tracing::info!("Starting GUI");

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(
                DryerApp::new(manager, settings).with_ticker(ticker),
            ))
        }),
    )
    .map_err(|e| {
        tracing::error!("GUI startup failed: {}", e);
        AppError::Gui(e.to_string())
    })
}
