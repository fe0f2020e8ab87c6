use crate::format::format_number;
use fibscope_core::config::IndicatorConfig;
use fibscope_core::indicator::entity::Column;
use fibscope_core::indicator::error::IndicatorError;
use fibscope_indicator::{Cell, Series};

/// # Summary
/// RSI 所处区间，仅作描述性标注。
///
/// # Invariants
/// - 边界值归入超买/超卖一侧 (>= overbought, <= oversold)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn classify(rsi: f64, config: &IndicatorConfig) -> Self {
        if rsi >= config.rsi_overbought {
            RsiZone::Overbought
        } else if rsi <= config.rsi_oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsiZone::Overbought => f.write_str("overbought"),
            RsiZone::Oversold => f.write_str("oversold"),
            RsiZone::Neutral => f.write_str("neutral"),
        }
    }
}

/// # Summary
/// 生成锚点行的摘要文本。
///
/// # Logic
/// 1. 按原始标签定位行，标签不在序列中时返回 `RowNotFound`。
/// 2. 输出日期、高低收与 RSI；RSI 已定义时附带区间标注。
///
/// # Arguments
/// * `series`: 已派生的序列 (通常是检索结果)。
/// * `label`: 锚点行的原始标签。
/// * `config`: 提供超买/超卖阈值。
pub fn render_anchor_summary(
    series: &Series,
    label: usize,
    config: &IndicatorConfig,
) -> Result<String, IndicatorError> {
    let (position, bar) = series
        .position_of(label)
        .and_then(|position| series.bars().get(position).map(|bar| (position, bar)))
        .ok_or(IndicatorError::RowNotFound(label))?;

    let rsi = match series.cell(position, Column::Rsi) {
        Some(Cell::Number(value)) => value,
        _ => None,
    };
    let rsi_text = match rsi {
        Some(value) => format!(
            "{} ({})",
            format_number(Some(value)),
            RsiZone::classify(value, config)
        ),
        None => "n/a".to_string(),
    };

    Ok(format!(
        "Anchor row {} ({}): High {}  Low {}  Close {}  RSI {}\n",
        label,
        bar.date.format("%Y-%m-%d"),
        format_number(Some(bar.high)),
        format_number(Some(bar.low)),
        format_number(Some(bar.close)),
        rsi_text,
    ))
}
