// Windows GUI应用程序配置，隐藏控制台窗口
#![cfg_attr(
    not(debug_assertions),
    windows_subsystem = "windows"
)]

mod cli;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use cli::{Args, Commands};

use cloth_dryer::app::config::manager::ConfigManager;
use cloth_dryer::app::config::types::AppSettings;
use cloth_dryer::app::logging::setup::init_logging;
use cloth_dryer::core::services::console_runner::{
    run_program, ConsoleRunOptions,
};
use cloth_dryer::{ProgramManager, Result};

#[tokio::main]
async fn main() -> ExitCode {
    // 解析命令行参数
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let mut config_manager = match &args.config {
        Some(path) => ConfigManager::with_file(path),
        None => ConfigManager::new()?,
    };
    config_manager.load()?;
    let settings = config_manager.settings()?;

    // 日志配置来自配置文件，加载期间的结果在这里补记
    let _logging = init_logging(&settings.logging);
    if config_manager.created_default() {
        tracing::info!(
            "Config file not found, wrote defaults to {:?}",
            config_manager.config_file()
        );
    } else {
        tracing::info!(
            "Configuration loaded from {:?}",
            config_manager.config_file()
        );
    }

    let manager = ProgramManager::new(settings.simulation);

    match args.command {
        // 没有子命令时启动 GUI
        None => run_gui(manager, &settings),
        Some(Commands::Run {
            program,
            time_scale,
            report_every,
        }) => {
            let options = ConsoleRunOptions {
                time_scale,
                report_every: Duration::from_secs(report_every.max(1)),
                ..ConsoleRunOptions::new(program)
            };
            let summary =
                run_program(&manager, &options, &mut std::io::stdout())
                    .await?;

            Ok(if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn run_gui(manager: ProgramManager, settings: &AppSettings) -> Result<ExitCode> {
    let ticker = manager.spawn_ticker(&tokio::runtime::Handle::current());
    cloth_dryer::ui::run_gui(manager, settings.ui, ticker)?;
    Ok(ExitCode::SUCCESS)
}
