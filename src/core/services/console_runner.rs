//! 命令行模式的程序运行器
//!
//! 不打开窗口，按固定步长推进模拟直到程序结束（冷却完成或故障），
//! 并定期输出进度。

use std::io::Write;
use std::time::Duration;

use crate::app::error::types::{DryerError, Result};
use crate::core::program::DryingProgram;
use crate::core::state::ProgramStatus;
use crate::utils::helpers::{
    format_clock, format_humidity, format_temperature, status_text,
};

use super::program_manager::ProgramManager;

/// 运行选项
#[derive(Debug, Clone)]
pub struct ConsoleRunOptions {
    pub program: DryingProgram,
    /// 每一步推进的模拟时长
    pub step: Duration,
    /// 进度输出间隔（模拟时间）
    pub report_every: Duration,
    /// 模拟时间上限
    pub max_duration: Duration,
    /// 模拟时间倍率，0 表示不等待、尽快运行
    pub time_scale: f64,
}

impl ConsoleRunOptions {
    /// 指定程序，其余使用默认值
    pub fn new(program: DryingProgram) -> Self {
        Self {
            program,
            step: Duration::from_secs(1),
            report_every: Duration::from_secs(60),
            max_duration: Duration::from_secs(4 * 3600),
            time_scale: 0.0,
        }
    }

    /// 每一步之间的真实等待时间，倍率为 0 时不等待
    pub fn pacing(&self) -> Result<Option<Duration>> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(DryerError::validation(
                "time_scale",
                "Must be 0 or a positive number",
            ));
        }
        if self.time_scale == 0.0 {
            return Ok(None);
        }

        Duration::try_from_secs_f64(
            self.step.as_secs_f64() / self.time_scale,
        )
        .map(Some)
        .map_err(|e| {
            DryerError::validation(
                "time_scale",
                format!("{} is too small: {e}", self.time_scale),
            )
        })
    }
}

/// 运行结果
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub program: DryingProgram,
    pub simulated: Duration,
    pub final_status: ProgramStatus,
    pub final_temperature: f64,
    pub final_humidity: f64,
    pub error: Option<String>,
}

impl RunSummary {
    /// 程序是否正常结束
    pub fn is_success(&self) -> bool {
        self.final_status == ProgramStatus::Idle && self.error.is_none()
    }
}

/// 运行一个程序直到结束
pub async fn run_program<W: Write>(
    manager: &ProgramManager,
    options: &ConsoleRunOptions,
    out: &mut W,
) -> Result<RunSummary> {
    let pacing = options.pacing()?;
    manager.start_program(options.program)?;
    writeln!(
        out,
        "[INFO] {} ({}) gestartet",
        options.program.display_name(),
        options.program.key()
    )?;

    let mut simulated = Duration::ZERO;
    let mut since_report = Duration::ZERO;

    loop {
        let snapshot = manager.snapshot();
        if !matches!(
            snapshot.status,
            ProgramStatus::Running | ProgramStatus::Cooling
        ) {
            break;
        }
        if simulated >= options.max_duration {
            tracing::warn!(
                "Simulation limit of {:?} reached, stopping",
                options.max_duration
            );
            manager.stop_program();
            break;
        }

        if let Some(delay) = pacing {
            tokio::time::sleep(delay).await;
        }

        manager.advance(options.step);
        simulated += options.step;
        since_report += options.step;

        if since_report >= options.report_every {
            since_report = Duration::ZERO;
            let snapshot = manager.snapshot();
            writeln!(
                out,
                "[{}] {} | {} | {} | Rest {}",
                format_clock(simulated.as_secs()),
                status_text(snapshot.status),
                format_temperature(snapshot.temperature),
                format_humidity(snapshot.humidity),
                format_clock(u64::from(snapshot.remaining_seconds)),
            )?;
        }
    }

    let snapshot = manager.snapshot();
    let summary = RunSummary {
        program: options.program,
        simulated,
        final_status: snapshot.status,
        final_temperature: snapshot.temperature,
        final_humidity: snapshot.humidity,
        error: snapshot.error,
    };

    match &summary.error {
        Some(error) => writeln!(out, "[ERROR] {error}")?,
        None => writeln!(
            out,
            "[SUCCESS] Fertig nach {} ({}, {})",
            format_clock(simulated.as_secs()),
            format_temperature(summary.final_temperature),
            format_humidity(summary.final_humidity),
        )?,
    }

    Ok(summary)
}
