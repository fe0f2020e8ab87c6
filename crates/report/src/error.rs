//! # 展示层统一错误处理

use thiserror::Error;

/// 导出与渲染错误枚举
#[derive(Error, Debug)]
pub enum ReportError {
    /// 文件创建或写入失败
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV 编码失败
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON 序列化失败
    #[error("Serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialize(err.to_string())
    }
}
