use fibscope_core::indicator::error::IndicatorError;

/// # Summary
/// 指数移动平均 (递归形式，首值即种子)。
///
/// # Logic
/// 1. `alpha = 2 / (span + 1)`。
/// 2. `ema[0] = x[0]`，之后 `ema[t] = alpha * x[t] + (1 - alpha) * ema[t-1]`。
/// 3. NaN 输入不参与更新，沿用上一个值；尚无有效值时为 None。
///
/// # Arguments
/// * `values`: 输入序列。
/// * `span`: 平滑跨度，必须大于 0。
///
/// # Returns
/// 与输入等长的序列。
pub fn calculate_ema(values: &[f64], span: u32) -> Result<Vec<Option<f64>>, IndicatorError> {
    if span == 0 {
        return Err(IndicatorError::InvalidPeriod(0));
    }

    let alpha = 2.0 / (f64::from(span) + 1.0);
    let mut current: Option<f64> = None;

    let result = values
        .iter()
        .map(|&value| {
            if !value.is_nan() {
                current = Some(match current {
                    None => value,
                    Some(prev) => alpha * value + (1.0 - alpha) * prev,
                });
            }
            current
        })
        .collect();

    Ok(result)
}
