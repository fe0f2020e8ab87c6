use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 证券标的实体，代表一次分析所针对的股票、指数或其他资产。
///
/// # Invariants
/// - `symbol` 去除首尾空白并统一为大写 (例如: `^GDAXI`, `AAPL`)。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker {
    // 行情代码
    pub symbol: String,
}

impl Ticker {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self {
            symbol: symbol.as_ref().trim().to_uppercase(),
        }
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}

/// # Summary
/// K 线周期枚举，与行情源的 interval 参数一一对应。
///
/// # Invariants
/// - 仅支持日线及以上周期，分析对象是历史收盘数据。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    // 日线
    #[default]
    #[serde(rename = "1d", alias = "day1")]
    Day1,
    // 周线
    #[serde(rename = "1wk", alias = "week1")]
    Week1,
    // 月线
    #[serde(rename = "1mo", alias = "month1")]
    Month1,
}

impl Interval {
    /// 行情源使用的周期字符串。
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Day1 => "1d",
            Interval::Week1 => "1wk",
            Interval::Month1 => "1mo",
        }
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "day1" => Ok(Interval::Day1),
            "1wk" | "week1" => Ok(Interval::Week1),
            "1mo" | "month1" => Ok(Interval::Month1),
            _ => Err(format!("Unknown Interval: {}", s)),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Summary
/// 历史回溯区间，决定向行情源请求多长的数据。
///
/// # Invariants
/// - 每个区间都可以精确换算为自然月数。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Lookback {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Lookback {
    /// 行情源使用的 range 字符串。
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
            Lookback::FiveYears => "5y",
        }
    }

    /// 区间对应的自然月数。
    pub fn months(&self) -> u32 {
        match self {
            Lookback::OneMonth => 1,
            Lookback::ThreeMonths => 3,
            Lookback::SixMonths => 6,
            Lookback::OneYear => 12,
            Lookback::TwoYears => 24,
            Lookback::FiveYears => 60,
        }
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(Lookback::OneMonth),
            "3mo" => Ok(Lookback::ThreeMonths),
            "6mo" => Ok(Lookback::SixMonths),
            "1y" => Ok(Lookback::OneYear),
            "2y" => Ok(Lookback::TwoYears),
            "5y" => Ok(Lookback::FiveYears),
            _ => Err(format!("Unknown Lookback: {}", s)),
        }
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
