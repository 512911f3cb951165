//! 烘干程序定义

use std::fmt;
use std::str::FromStr;

use crate::app::error::types::DryerError;

/// 程序的物理参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramProfile {
    /// 湿度下降速率（%/秒）
    pub humidity_decrease_rate: f64,
    /// 目标温度（°C）
    pub target_temperature: f64,
    /// 程序时长（秒）
    pub duration_secs: u32,
}

/// 烘干程序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DryingProgram {
    /// 棉织物
    Cotton,
    /// 化纤
    Synthetic,
    /// 羊毛
    Wool,
}

impl DryingProgram {
    /// 所有程序，按界面显示顺序
    pub const ALL: [DryingProgram; 3] = [
        DryingProgram::Cotton,
        DryingProgram::Synthetic,
        DryingProgram::Wool,
    ];

    /// 内部名称
    pub fn key(self) -> &'static str {
        match self {
            DryingProgram::Cotton => "cotton",
            DryingProgram::Synthetic => "synthetic",
            DryingProgram::Wool => "wool",
        }
    }

    /// 界面显示名称
    pub fn display_name(self) -> &'static str {
        match self {
            DryingProgram::Cotton => "Baumwolle",
            DryingProgram::Synthetic => "Synthetik",
            DryingProgram::Wool => "Wolle",
        }
    }

    pub fn profile(self) -> ProgramProfile {
        match self {
            DryingProgram::Cotton => ProgramProfile {
                humidity_decrease_rate: 0.8,
                target_temperature: 75.0,
                duration_secs: 3600,
            },
            DryingProgram::Synthetic => ProgramProfile {
                humidity_decrease_rate: 0.5,
                target_temperature: 60.0,
                duration_secs: 2700,
            },
            DryingProgram::Wool => ProgramProfile {
                humidity_decrease_rate: 0.3,
                target_temperature: 45.0,
                duration_secs: 1800,
            },
        }
    }
}

impl fmt::Display for DryingProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DryingProgram {
    type Err = DryerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cotton" => Ok(DryingProgram::Cotton),
            "synthetic" => Ok(DryingProgram::Synthetic),
            "wool" => Ok(DryingProgram::Wool),
            _ => Err(DryerError::UnknownProgram(s.to_string())),
        }
    }
}
