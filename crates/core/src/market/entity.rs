use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根 K 线数据实体 (OHLCV)，日期粒度，不含时分秒。
///
/// # Invariants
/// - 期望 `low <= open, close <= high`，但指标引擎不做强制校验。
/// - 序列中按 `date` 升序排列，且不存在重复日期。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    // 交易日 (周线/月线为周期起始日)
    pub date: NaiveDate,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量
    pub volume: f64,
}
