use thiserror::Error;

/// # Summary
/// 市场数据域错误枚举，处理网络、解析及数据缺失等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum MarketError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON/CSV 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 本地文件读取失败
    #[error("I/O error: {0}")]
    Io(String),
    // 请求的标的不存在
    #[error("Data not found: {0}")]
    NotFound(String),
    // 未知或未分类的错误 (例如行情源返回的业务错误描述)
    #[error("Unknown error: {0}")]
    Unknown(String),
}
