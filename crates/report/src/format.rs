use fibscope_indicator::Cell;

/// 展示层统一保留的小数位数。
pub const DISPLAY_DECIMALS: i32 = 2;

/// 四舍五入到 `dp` 位小数 (远离零方向)。
pub fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10_f64.powi(dp);
    (value * factor).round() / factor
}

/// # Summary
/// 格式化数值：两位小数，未定义或非有限值渲染为空串。
pub fn format_number(value: Option<f64>) -> String {
    match value {
        // 加 0.0 消去负零
        Some(v) if v.is_finite() => format!("{:.2}", round_dp(v, DISPLAY_DECIMALS) + 0.0),
        _ => String::new(),
    }
}

/// # Summary
/// 格式化单元格：日期为 ISO-8601，数值走 `format_number`。
pub fn format_cell(cell: Option<Cell>) -> String {
    match cell {
        Some(Cell::Date(date)) => date.format("%Y-%m-%d").to_string(),
        Some(Cell::Number(value)) => format_number(value),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(1.23456, 2), 1.23);
        assert_eq!(round_dp(-1.235001, 2), -1.24);
        assert_eq!(round_dp(161.8, 0), 162.0);
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_number(Some(61.8)), "61.80");
        assert_eq!(format_number(Some(-0.004)), "0.00");
        assert_eq!(format_number(None), "");
        assert_eq!(format_number(Some(f64::NAN)), "");
        assert_eq!(format_number(Some(f64::INFINITY)), "");
        assert_eq!(
            format_cell(Some(Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()))),
            "2024-03-09"
        );
        assert_eq!(format_cell(Some(Cell::Number(Some(78.571_428)))), "78.57");
        assert_eq!(format_cell(None), "");
    }
}
