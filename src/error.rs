use std::path::PathBuf;
use thiserror::Error;

/// 对账流程错误类型
///
/// 只有输入缺失/无法解析才会中断一次运行；空条码、零匹配、零库存都属于正常数据状态。
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("{} is missing", .path.display())]
    MissingFile { path: PathBuf },

    #[error("Missing columns {columns:?} in {}", .path.display())]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("Unsupported file type: {}", .path.display())]
    UnsupportedFileType { path: PathBuf },

    #[error("Invalid quantity '{value}' at line {line} of {}", .path.display())]
    InvalidQuantity {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
