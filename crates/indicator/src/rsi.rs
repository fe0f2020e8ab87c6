use crate::buffer::RollingBuffer;
use fibscope_core::indicator::error::IndicatorError;

/// 默认 RSI 窗口长度。
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// 平均亏损为 0 (或 RS 为 0) 时的替代值。
///
/// 这是一个近似：连续上涨时 RSI 会非常接近但不会等于 100，
/// 下游依赖这个确定的数值，不要改成别的钳制方式。
pub const ZERO_SUBSTITUTE: f64 = 0.0001;

/// # Summary
/// 计算 RSI，平均涨跌幅采用尾随窗口的简单均值 (非 Wilder 指数平滑)。
///
/// # Logic
/// 1. `delta[i] = closes[i] - closes[i-1]`，首根没有 delta。
/// 2. 正 delta 计入涨幅，负 delta 的绝对值计入跌幅；NaN delta 两边都记 0。
/// 3. 凑满 `period` 个 delta 后取两者的简单均值，不计算部分窗口。
/// 4. 平均跌幅为 0 时替换为 `ZERO_SUBSTITUTE`；RS 为 0 时同样替换。
/// 5. `rsi = 100 - 100 / (1 + rs)`。
///
/// # Arguments
/// * `closes`: 按时间升序的收盘价。
/// * `period`: 窗口长度，必须大于 0。
///
/// # Returns
/// 与输入等长的序列，前 `period` 个位置为 None；有定义的值都严格落在 (0, 100) 内。
pub fn calculate_rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    // n 个收盘价只有 n - 1 个 delta，凑不满窗口
    if period >= closes.len() {
        return Ok(vec![None; closes.len()]);
    }

    let mut gains = RollingBuffer::new(period);
    let mut losses = RollingBuffer::new(period);
    let mut result = Vec::with_capacity(closes.len());
    let mut previous: Option<f64> = None;

    for &close in closes {
        let Some(prev) = previous.replace(close) else {
            result.push(None);
            continue;
        };

        let delta = close - prev;
        gains.push(if delta > 0.0 { delta } else { 0.0 });
        losses.push(if delta < 0.0 { -delta } else { 0.0 });

        let value = match (gains.mean(), losses.mean()) {
            (Some(avg_gain), Some(avg_loss)) => Some(rsi_from_averages(avg_gain, avg_loss)),
            _ => None,
        };
        result.push(value);
    }

    Ok(result)
}

/// 由平均涨跌幅计算单个 RSI 值。
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let avg_loss = if avg_loss == 0.0 { ZERO_SUBSTITUTE } else { avg_loss };
    let mut rs = avg_gain / avg_loss;
    if rs == 0.0 {
        rs = ZERO_SUBSTITUTE;
    }
    100.0 - (100.0 / (1.0 + rs))
}
