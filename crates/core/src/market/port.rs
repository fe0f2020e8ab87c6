use crate::common::{Interval, Lookback, Ticker};
use crate::market::entity::PriceBar;
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 历史行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 返回的 K 线按日期升序排列。
/// - 标的存在但区间内没有数据时返回空列表，而不是错误。
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// # Summary
    /// 获取特定标的在回溯区间内的 K 线数据。
    ///
    /// # Logic
    /// 1. 将周期与回溯区间映射为数据源参数。
    /// 2. 执行请求（网络或本地文件）并解析数据。
    /// 3. 丢弃任一 OHLCV 字段缺失的行。
    ///
    /// # Arguments
    /// * `ticker`: 证券标的。
    /// * `interval`: K 线周期。
    /// * `lookback`: 回溯区间。
    ///
    /// # Returns
    /// 成功返回 K 线列表，失败返回 MarketError。
    async fn fetch_bars(
        &self,
        ticker: &Ticker,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<Vec<PriceBar>, MarketError>;

    /// 数据源名称，用于日志。
    fn name(&self) -> &'static str;
}
