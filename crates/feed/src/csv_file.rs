use crate::resample::{resample, trim_to_lookback};
use async_trait::async_trait;
use chrono::NaiveDate;
use fibscope_core::common::{Interval, Lookback, Ticker};
use fibscope_core::market::entity::PriceBar;
use fibscope_core::market::error::MarketError;
use fibscope_core::market::port::PriceSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// # Summary
/// 本地 CSV 行情源。
///
/// # Invariants
/// - 每个标的对应目录下的 `{SYMBOL}.csv`，内容为日线。
/// - 周线与月线由日线聚合得到，回溯窗口以文件中最后一个日期为准。
#[derive(Debug, Clone)]
pub struct CsvFileProvider {
    dir: PathBuf,
}

/// 单行 CSV 记录，表头兼容 `Date,Open,...` 与小写写法。
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date", alias = "date")]
    date: NaiveDate,
    #[serde(rename = "Open", alias = "open")]
    open: Option<f64>,
    #[serde(rename = "High", alias = "high")]
    high: Option<f64>,
    #[serde(rename = "Low", alias = "low")]
    low: Option<f64>,
    #[serde(rename = "Close", alias = "close")]
    close: Option<f64>,
    #[serde(rename = "Volume", alias = "volume")]
    volume: Option<f64>,
}

impl CsvFileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        self.dir.join(format!("{}.csv", ticker.symbol))
    }
}

/// # Summary
/// 解析 CSV 文本为日线。
///
/// # Logic
/// 1. 字段两端空白会被去除。
/// 2. OHLCV 任一为空的行丢弃，日期无法解析则整体报错。
/// 3. 结果按日期升序，同日重复行保留最后一条。
pub fn parse_csv_bars(data: &[u8]) -> Result<Vec<PriceBar>, MarketError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut bars = Vec::new();
    for record in reader.deserialize::<CsvRow>() {
        let row = record.map_err(|e| MarketError::Parse(e.to_string()))?;
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
            (row.open, row.high, row.low, row.close, row.volume)
        else {
            debug!(date = %row.date, "Dropped incomplete CSV row");
            continue;
        };
        bars.push(PriceBar {
            date: row.date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    // 稳定排序，dedup 前翻转使同日保留最后出现的一条
    bars.sort_by_key(|bar| bar.date);
    bars.reverse();
    bars.dedup_by_key(|bar| bar.date);
    bars.reverse();
    Ok(bars)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, MarketError> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MarketError::NotFound(path.display().to_string()),
        _ => MarketError::Io(format!("{}: {}", path.display(), e)),
    })
}

#[async_trait]
impl PriceSource for CsvFileProvider {
    async fn fetch_bars(
        &self,
        ticker: &Ticker,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<Vec<PriceBar>, MarketError> {
        let path = self.path_for(ticker);
        let data = read_file(&path).await?;
        let daily = parse_csv_bars(&data)?;
        let bars = resample(&trim_to_lookback(daily, lookback), interval);

        info!(
            ticker = %ticker,
            path = %path.display(),
            bars = bars.len(),
            "Loaded price history from CSV"
        );
        Ok(bars)
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}
