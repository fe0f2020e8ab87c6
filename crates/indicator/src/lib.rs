//! # `fibscope-indicator` - 指标引擎
//!
//! 纯函数式的指标计算：斐波那契回撤/扩展位、RSI、EMA，
//! 以及带派生列的 `Series` 和按容差的多列数值检索。
//!
//! 所有计算保持完整浮点精度，保留两位小数只发生在展示层 (`fibscope-report`)。

pub mod buffer;
pub mod ema;
pub mod fibonacci;
pub mod rsi;
pub mod search;
pub mod series;

pub use fibonacci::{FibonacciLevel, FibonacciLevelSet, LevelKind, calculate_fibonacci_levels};
pub use rsi::calculate_rsi;
pub use search::search_value_in_columns;
pub use series::{Cell, Series};
