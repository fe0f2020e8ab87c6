use crate::common::{Interval, Lookback};
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub market: MarketConfig,
    pub indicator: IndicatorConfig,
    pub search: SearchConfig,
    pub log: LogConfig,
}

/// 行情源种类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Yahoo,
    Csv,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(SourceKind::Yahoo),
            "csv" => Ok(SourceKind::Csv),
            _ => Err(format!("Unknown SourceKind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub ticker: String,
    pub lookback: Lookback,
    pub interval: Interval,
    pub source: SourceKind,
    // CSV 数据源的根目录，文件名为 {SYMBOL}.csv
    pub csv_dir: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// # Summary
/// 派生列的计算参数。
///
/// # Invariants
/// - `rsi_period` 与 `ema_spans` 中的每个值都必须大于 0，否则派生时返回 `InvalidPeriod`。
/// - `rsi_oversold` < `rsi_overbought`，两者只用于展示层的区间标注。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub ema_spans: Vec<u32>,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub value: f64,
    pub tolerance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    // EnvFilter 语法，RUST_LOG 存在时以其为准
    pub level: String,
    // 设置后额外按天滚动写入该目录
    pub dir: Option<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            ticker: "^GDAXI".to_string(),
            lookback: Lookback::OneYear,
            interval: Interval::Day1,
            source: SourceKind::Yahoo,
            csv_dir: "data".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            ema_spans: vec![5, 14, 26],
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            value: 0.0,
            tolerance: 10.0,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.market.ticker, "^GDAXI");
        assert_eq!(config.market.lookback, Lookback::OneYear);
        assert_eq!(config.market.interval, Interval::Day1);
        assert_eq!(config.market.source, SourceKind::Yahoo);
        assert_eq!(config.indicator.rsi_period, 14);
        assert_eq!(config.indicator.ema_spans, vec![5, 14, 26]);
        assert_eq!(config.search.tolerance, 10.0);
        assert_eq!(config.log.level, "info");
        assert!(config.log.dir.is_none());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "market": { "ticker": "AAPL", "interval": "1wk" }, "search": { "value": 180.5 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.market.ticker, "AAPL");
        assert_eq!(config.market.interval, Interval::Week1);
        assert_eq!(config.market.lookback, Lookback::OneYear);
        assert_eq!(config.search.value, 180.5);
        assert_eq!(config.search.tolerance, 10.0);
        assert_eq!(config.indicator.rsi_period, 14);
    }
}
