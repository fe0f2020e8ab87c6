//! # `fibscope-report` - 展示层
//!
//! 引擎内部始终保持完整精度，本 crate 是唯一做两位小数舍入的地方：
//! - [`format`]：数值与单元格格式化。
//! - [`table`]：序列与斐波那契价位的文本表格。
//! - [`summary`]：锚点行摘要与 RSI 区间标注。
//! - [`export`]：CSV / JSON 导出。

pub mod error;
pub mod export;
pub mod format;
pub mod summary;
pub mod table;

pub use error::ReportError;
