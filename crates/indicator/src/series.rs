use crate::ema::calculate_ema;
use crate::rsi::calculate_rsi;
use chrono::NaiveDate;
use fibscope_core::config::IndicatorConfig;
use fibscope_core::indicator::entity::Column;
use fibscope_core::indicator::error::IndicatorError;
use fibscope_core::market::entity::PriceBar;
use std::collections::BTreeMap;
use tracing::debug;

/// 成交量差值换算为百万单位。
const VOLUME_SCALE: f64 = 1e6;

/// # Summary
/// 单元格取值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Date(NaiveDate),
    // None 表示该位置未定义 (例如 RSI 预热期)
    Number(Option<f64>),
}

/// # Summary
/// 带派生列的 K 线时间序列。
///
/// # Invariants
/// - `index`、`bars` 以及每个派生列的长度始终一致。
/// - 基础 OHLCV 列只读，派生列只能追加或整体替换。
/// - `index` 是行在原始序列中的位置标签，行子集化后保持不变。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    // 原始位置标签
    index: Vec<usize>,
    bars: Vec<PriceBar>,
    derived: BTreeMap<Column, Vec<Option<f64>>>,
}

impl Series {
    /// 由按日期升序排列的 K 线构造序列，标签为 0..n。
    pub fn new(bars: Vec<PriceBar>) -> Self {
        Self {
            index: (0..bars.len()).collect(),
            bars,
            derived: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// 当前序列的全部列，按展示顺序排列。
    pub fn columns(&self) -> Vec<Column> {
        Column::BASE
            .iter()
            .copied()
            .chain(self.derived.keys().copied())
            .collect()
    }

    /// 全部数值列。
    pub fn numeric_columns(&self) -> Vec<Column> {
        self.columns()
            .into_iter()
            .filter(Column::is_numeric)
            .collect()
    }

    pub fn has_column(&self, column: Column) -> bool {
        !column.is_derived() || self.derived.contains_key(&column)
    }

    /// # Summary
    /// 取出一整列数值。
    ///
    /// # Returns
    /// - `Ok(None)`：非数值列 (Date)。
    /// - `Err(InvalidColumn)`：派生列尚未计算。
    pub fn numeric_column(&self, column: Column) -> Result<Option<Vec<Option<f64>>>, IndicatorError> {
        let pick = |f: fn(&PriceBar) -> f64| -> Option<Vec<Option<f64>>> {
            Some(self.bars.iter().map(|bar| Some(f(bar))).collect())
        };
        match column {
            Column::Date => Ok(None),
            Column::Open => Ok(pick(|bar| bar.open)),
            Column::High => Ok(pick(|bar| bar.high)),
            Column::Low => Ok(pick(|bar| bar.low)),
            Column::Close => Ok(pick(|bar| bar.close)),
            Column::Volume => Ok(pick(|bar| bar.volume)),
            derived => self
                .derived
                .get(&derived)
                .map(|values| Some(values.clone()))
                .ok_or(IndicatorError::InvalidColumn(derived)),
        }
    }

    /// 按行位置 (非标签) 读取单元格；越界或列缺失时为 None。
    pub fn cell(&self, position: usize, column: Column) -> Option<Cell> {
        let bar = self.bars.get(position)?;
        let cell = match column {
            Column::Date => Cell::Date(bar.date),
            Column::Open => Cell::Number(Some(bar.open)),
            Column::High => Cell::Number(Some(bar.high)),
            Column::Low => Cell::Number(Some(bar.low)),
            Column::Close => Cell::Number(Some(bar.close)),
            Column::Volume => Cell::Number(Some(bar.volume)),
            derived => Cell::Number(*self.derived.get(&derived)?.get(position)?),
        };
        Some(cell)
    }

    /// # Summary
    /// 追加或替换一个派生列。
    ///
    /// # Errors
    /// - 基础列不可写：`InvalidColumn`。
    /// - 长度与行数不符：`LengthMismatch`。
    pub fn insert_column(&mut self, column: Column, values: Vec<Option<f64>>) -> Result<(), IndicatorError> {
        if !column.is_derived() {
            return Err(IndicatorError::InvalidColumn(column));
        }
        if values.len() != self.len() {
            return Err(IndicatorError::LengthMismatch {
                column,
                expected: self.len(),
                actual: values.len(),
            });
        }
        self.derived.insert(column, values);
        Ok(())
    }

    /// # Summary
    /// 按配置计算全部派生列。
    ///
    /// # Logic
    /// 1. 收盘价环比百分比与差值。
    /// 2. 成交量差值 (百万) 与环比百分比。
    /// 3. RSI 与各 span 的 EMA。
    /// 4. 全部计算成功后才写入；任一参数非法时序列保持原样。
    ///
    /// 空序列同样会得到 (空的) 派生列，不报错。
    pub fn enrich(&mut self, config: &IndicatorConfig) -> Result<(), IndicatorError> {
        let closes: Vec<f64> = self.bars.iter().map(|bar| bar.close).collect();
        let volumes: Vec<f64> = self.bars.iter().map(|bar| bar.volume).collect();
        let volume_diff: Vec<Option<f64>> = diff(&volumes)
            .into_iter()
            .map(|value| value.map(|v| v / VOLUME_SCALE))
            .collect();

        let mut computed = vec![
            (Column::PctChange, pct_change(&closes)),
            (Column::PriceDifference, diff(&closes)),
            (Column::VolumeDifference, volume_diff),
            (Column::PctVolumeDifference, pct_change(&volumes)),
            (Column::Rsi, calculate_rsi(&closes, config.rsi_period)?),
        ];
        for &span in &config.ema_spans {
            computed.push((Column::Ema(span), calculate_ema(&closes, span)?));
        }

        for (column, values) in computed {
            self.insert_column(column, values)?;
        }

        debug!(
            rows = self.len(),
            columns = self.derived.len(),
            "Series enriched with derived columns"
        );
        Ok(())
    }

    /// # Summary
    /// 按行位置提取子集，保留全部列与原始标签。
    ///
    /// 越界位置会被忽略。
    pub fn select_rows(&self, positions: &[usize]) -> Series {
        let positions: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&p| p < self.len())
            .collect();
        Series {
            index: positions.iter().map(|&p| self.index[p]).collect(),
            bars: positions.iter().map(|&p| self.bars[p]).collect(),
            derived: self
                .derived
                .iter()
                .map(|(column, values)| (*column, positions.iter().map(|&p| values[p]).collect()))
                .collect(),
        }
    }

    /// 按原始标签查找行位置。
    pub fn position_of(&self, label: usize) -> Option<usize> {
        self.index.iter().position(|&l| l == label)
    }

    /// 按原始标签取 K 线。
    pub fn bar_by_label(&self, label: usize) -> Result<&PriceBar, IndicatorError> {
        self.position_of(label)
            .and_then(|p| self.bars.get(p))
            .ok_or(IndicatorError::RowNotFound(label))
    }
}

/// 相邻差值，首位为 None。
fn diff(values: &[f64]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(values.windows(2).map(|w| Some(w[1] - w[0])))
        .take(values.len())
        .collect()
}

/// 环比百分比，首位或前值为 0 时为 None。
fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(values.windows(2).map(|w| {
            let change = (w[1] / w[0] - 1.0) * 100.0;
            change.is_finite().then_some(change)
        }))
        .take(values.len())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_and_pct_change() {
        assert_eq!(diff(&[]), Vec::<Option<f64>>::new());
        assert_eq!(diff(&[5.0]), vec![None]);
        assert_eq!(diff(&[5.0, 7.5, 7.0]), vec![None, Some(2.5), Some(-0.5)]);
        let pct = pct_change(&[100.0, 110.0]);
        assert_eq!(pct[0], None);
        assert!((pct[1].unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(pct_change(&[0.0, 10.0]), vec![None, None]);
    }
}
