use crate::series::Series;
use fibscope_core::indicator::entity::Column;
use fibscope_core::indicator::error::IndicatorError;
use tracing::debug;

/// # Summary
/// 在多列中按容差查找数值。
///
/// # Logic
/// 1. 校验容差为非负有限数。
/// 2. 对每个选中的列：非数值列直接跳过；数值列逐行判断是否落在
///    `[target - tolerance, target + tolerance]` (两端闭区间)。
/// 3. 各列结果取并集：任一列命中即保留该行。未定义的单元格永不命中。
/// 4. 按原顺序返回命中行，保留全部列与原始标签。
///
/// # Arguments
/// * `series`: 待检索序列。
/// * `target`: 目标值。
/// * `tolerance`: 容差半宽，0 表示精确匹配。
/// * `columns`: 参与检索的列。
///
/// # Returns
/// 命中行组成的子序列。列选择为空或不含数值列时返回空序列；
/// 选中了尚未派生的列时返回 `InvalidColumn`。
pub fn search_value_in_columns(
    series: &Series,
    target: f64,
    tolerance: f64,
    columns: &[Column],
) -> Result<Series, IndicatorError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(IndicatorError::InvalidTolerance(tolerance));
    }

    let lower = target - tolerance;
    let upper = target + tolerance;
    let mut matched: Option<Vec<bool>> = None;

    for &column in columns {
        let Some(values) = series.numeric_column(column)? else {
            debug!(%column, "Skipping non-numeric column in value search");
            continue;
        };

        let hits = values
            .iter()
            .map(|value| value.is_some_and(|v| v >= lower && v <= upper));
        matched = Some(match matched {
            None => hits.collect(),
            Some(acc) => acc.iter().zip(hits).map(|(a, b)| *a || b).collect(),
        });
    }

    let positions: Vec<usize> = matched
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(position, hit)| hit.then_some(position))
        .collect();

    debug!(target, tolerance, hits = positions.len(), "Value search finished");
    Ok(series.select_rows(&positions))
}
