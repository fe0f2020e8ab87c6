use anyhow::{Context, bail};
use fibscope_core::common::{Interval, Lookback, Ticker};
use fibscope_core::config::{AppConfig, IndicatorConfig};
use fibscope_core::indicator::entity::Column;
use fibscope_core::market::port::PriceSource;
use fibscope_indicator::{FibonacciLevelSet, Series, calculate_fibonacci_levels, search_value_in_columns};
use std::sync::Arc;
use tracing::{info, warn};

/// 一次分析的输入。
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub ticker: Ticker,
    pub interval: Interval,
    pub lookback: Lookback,
    pub value: f64,
    pub tolerance: f64,
    // None 表示检索全部数值列
    pub columns: Option<Vec<Column>>,
    // 锚点行的原始标签，None 时取第一条命中
    pub row: Option<usize>,
}

impl AnalysisRequest {
    pub fn from_config(config: &AppConfig, columns: Option<Vec<Column>>, row: Option<usize>) -> Self {
        Self {
            ticker: Ticker::new(&config.market.ticker),
            interval: config.market.interval,
            lookback: config.market.lookback,
            value: config.search.value,
            tolerance: config.search.tolerance,
            columns,
            row,
        }
    }
}

/// 分析结果：完整序列、命中行与锚点价位。
#[derive(Debug)]
pub struct AnalysisReport {
    pub series: Series,
    pub matches: Series,
    pub searched: Vec<Column>,
    pub anchor: Option<usize>,
    pub levels: Option<FibonacciLevelSet>,
}

/// # Summary
/// 串联行情源与指标引擎的应用服务。
///
/// # Invariants
/// - 只依赖 `PriceSource` 抽象，具体实现由 main 注入。
pub struct Analyzer {
    source: Arc<dyn PriceSource>,
    indicator: IndicatorConfig,
}

impl Analyzer {
    pub fn new(source: Arc<dyn PriceSource>, indicator: IndicatorConfig) -> Self {
        Self { source, indicator }
    }

    /// # Summary
    /// 执行一次完整分析。
    ///
    /// # Logic
    /// 1. 抓取 K 线，结果为空时报错 "No data available"。
    /// 2. 计算全部派生列。
    /// 3. 在选中的列中按容差检索；列选择为空时记录警告并得到空结果。
    /// 4. 选出锚点行 (显式标签或第一条命中)，以其高低点计算斐波那契价位。
    ///
    /// # Returns
    /// 没有命中时 `anchor` 与 `levels` 均为 None；显式给出的标签不在命中行中时返回错误。
    pub async fn run(&self, request: &AnalysisRequest) -> anyhow::Result<AnalysisReport> {
        let bars = self
            .source
            .fetch_bars(&request.ticker, request.interval, request.lookback)
            .await
            .with_context(|| {
                format!("Failed to fetch {} from {}", request.ticker, self.source.name())
            })?;
        if bars.is_empty() {
            bail!("No data available for {}", request.ticker);
        }

        let mut series = Series::new(bars);
        series.enrich(&self.indicator)?;

        let searched = match &request.columns {
            Some(columns) => columns.clone(),
            None => series.numeric_columns(),
        };
        if searched.is_empty() {
            warn!("No columns selected for value search, result is empty");
        }
        let matches = search_value_in_columns(&series, request.value, request.tolerance, &searched)?;
        info!(
            ticker = %request.ticker,
            rows = series.len(),
            matches = matches.len(),
            value = request.value,
            tolerance = request.tolerance,
            "Value search finished"
        );

        let anchor = match request.row {
            Some(label) => {
                matches
                    .bar_by_label(label)
                    .with_context(|| format!("Row {} is not among the search results", label))?;
                Some(label)
            }
            None => matches.index().first().copied(),
        };

        let levels = match anchor {
            Some(label) => {
                let bar = matches.bar_by_label(label)?;
                if bar.high < bar.low {
                    warn!(label, high = bar.high, low = bar.low, "Anchor row has high below low");
                }
                Some(calculate_fibonacci_levels(bar.high, bar.low))
            }
            None => None,
        };

        Ok(AnalysisReport {
            series,
            matches,
            searched,
            anchor,
            levels,
        })
    }
}
