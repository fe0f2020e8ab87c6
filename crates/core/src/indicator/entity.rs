use crate::indicator::error::IndicatorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 序列列标识。取代运行时任意字符串列名，每个标识都有确定的取值方式。
///
/// # Invariants
/// - 变体声明顺序即展示顺序：日期、基础 OHLCV、派生列。
/// - `Display` 输出的展示名可以经 `FromStr` 解析回同一个变体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    // 日期 (唯一的非数值列)
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
    // 收盘价环比百分比
    PctChange,
    // 收盘价与前一根的差值
    PriceDifference,
    // 成交量差值，单位百万
    VolumeDifference,
    // 成交量环比百分比
    PctVolumeDifference,
    Rsi,
    // 指定 span 的 EMA
    Ema(u32),
}

impl Column {
    /// 基础列 (直接来自 K 线)。
    pub const BASE: [Column; 6] = [
        Column::Date,
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
    ];

    /// 是否为可参与数值比较的列。
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Column::Date)
    }

    /// 是否为派生列 (由引擎追加，基础列不可被改写)。
    pub fn is_derived(&self) -> bool {
        !Self::BASE.contains(self)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Date => f.write_str("Date"),
            Column::Open => f.write_str("Open"),
            Column::High => f.write_str("High"),
            Column::Low => f.write_str("Low"),
            Column::Close => f.write_str("Close"),
            Column::Volume => f.write_str("Volume"),
            Column::PctChange => f.write_str("% Difference"),
            Column::PriceDifference => f.write_str("Price Difference"),
            Column::VolumeDifference => f.write_str("Volume Difference"),
            Column::PctVolumeDifference => f.write_str("% Volume Difference"),
            Column::Rsi => f.write_str("RSI"),
            Column::Ema(span) => write!(f, "EMA{}", span),
        }
    }
}

impl FromStr for Column {
    type Err = IndicatorError;

    /// 接受展示名 (大小写不敏感) 以及 snake_case 别名。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let column = match key.as_str() {
            "date" => Column::Date,
            "open" => Column::Open,
            "high" => Column::High,
            "low" => Column::Low,
            "close" => Column::Close,
            "volume" => Column::Volume,
            "% difference" | "pct_change" => Column::PctChange,
            "price difference" | "price_difference" => Column::PriceDifference,
            "volume difference" | "volume_difference" => Column::VolumeDifference,
            "% volume difference" | "pct_volume_difference" => Column::PctVolumeDifference,
            "rsi" => Column::Rsi,
            other => {
                let span = other
                    .strip_prefix("ema")
                    .map(|rest| rest.trim_start_matches('_'))
                    .and_then(|rest| rest.parse::<u32>().ok())
                    .filter(|span| *span > 0);
                match span {
                    Some(span) => Column::Ema(span),
                    None => return Err(IndicatorError::UnknownColumn(s.to_string())),
                }
            }
        };
        Ok(column)
    }
}
