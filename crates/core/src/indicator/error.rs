use crate::indicator::entity::Column;
use thiserror::Error;

/// # Summary
/// 指标引擎错误枚举。
///
/// # Invariants
/// - 只用于调用方可以修正的输入问题；非数值列被跳过、空列选择、
///   高低点相等等情况都不是错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    // 无法识别的列名
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    // 列可识别，但当前序列中尚未派生 (或不允许写入)
    #[error("Column not present in series: {0}")]
    InvalidColumn(Column),
    // 窗口长度必须大于 0
    #[error("Invalid period: {0}")]
    InvalidPeriod(usize),
    // 容差必须是非负有限数
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),
    // 按索引标签查找行失败
    #[error("Row not found: {0}")]
    RowNotFound(usize),
    // 派生列长度与序列行数不一致
    #[error("Length mismatch for {column}: expected {expected}, got {actual}")]
    LengthMismatch {
        column: Column,
        expected: usize,
        actual: usize,
    },
}
