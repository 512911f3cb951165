use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cloth_dryer::DryingProgram;

/// 洗衣烘干机模拟器
#[derive(Parser, Debug)]
#[command(name = "cloth-dryer")]
#[command(about = "Wäschetrockner-Simulation mit grafischer Oberfläche")]
#[command(version)]
pub struct Args {
    /// 配置文件路径（默认：当前目录或程序目录下的 config.toml）
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// 子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 不打开窗口，在命令行中运行一个烘干程序
    Run {
        /// 烘干程序 (cotton, synthetic, wool)
        #[arg(short, long, value_name = "PROGRAM")]
        program: DryingProgram,

        /// 模拟时间倍率，0 表示尽快运行
        #[arg(short, long, value_name = "FACTOR", default_value_t = 60.0)]
        time_scale: f64,

        /// 进度输出间隔（模拟秒数）
        #[arg(short, long, value_name = "SECONDS", default_value_t = 60)]
        report_every: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_starts_gui() {
        let args = Args::try_parse_from(["cloth-dryer"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_run_command() {
        let args = Args::try_parse_from([
            "cloth-dryer",
            "run",
            "--program",
            "Wool",
            "--time-scale",
            "0",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        match args.command {
            Some(Commands::Run {
                program,
                time_scale,
                report_every,
            }) => {
                assert_eq!(program, DryingProgram::Wool);
                assert_eq!(time_scale, 0.0);
                assert_eq!(report_every, 60);
            }
            None => panic!("expected run command"),
        }
    }

    #[test]
    fn test_unknown_program_is_rejected() {
        assert!(Args::try_parse_from([
            "cloth-dryer",
            "run",
            "--program",
            "silk"
        ])
        .is_err());
    }
}
