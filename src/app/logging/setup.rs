//! 日志系统设置
//!
//! 控制台输出 + 每次启动一个日志文件（`<prefix>_YYYYmmdd_HHMMSS.log`）。

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app::config::types::LoggingSettings;

/// 日志守卫，销毁时刷新文件日志
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    log_file: Option<PathBuf>,
}

impl LoggingGuard {
    /// 本次会话的日志文件
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// 本次会话的日志文件名
pub fn session_log_file_name(prefix: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{prefix}_{timestamp}.log")
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // 默认日志级别：debug模式下显示debug信息，release模式下显示info信息
        if cfg!(debug_assertions) {
            EnvFilter::new("cloth_dryer=debug,warn")
        } else {
            EnvFilter::new("cloth_dryer=info,warn")
        }
    })
}

/// 初始化日志系统
///
/// 日志目录无法创建时退化为仅控制台输出。重复调用不会 panic。
pub fn init_logging(settings: &LoggingSettings) -> LoggingGuard {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    let mut warn_msg = None;
    let mut file_guard = None;
    let mut log_file = None;
    let mut file_layer = None;

    match std::fs::create_dir_all(&settings.directory) {
        Ok(()) => {
            let file_name = session_log_file_name(&settings.file_prefix);
            let appender = tracing_appender::rolling::never(
                &settings.directory,
                &file_name,
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            log_file = Some(settings.directory.join(file_name));
            file_layer = Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            );
        }
        Err(err) => {
            warn_msg = Some(format!(
                "File logging disabled ({}): {}",
                settings.directory.display(),
                err
            ));
        }
    }

    let initialized = tracing_subscriber::registry()
        .with(default_filter())
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if let Some(message) = warn_msg {
        tracing::warn!("{message}");
    }
    if initialized {
        if let Some(path) = &log_file {
            tracing::info!("Logging to {:?}", path);
        }
    }

    LoggingGuard {
        _file_guard: file_guard,
        log_file: if initialized { log_file } else { None },
    }
}
