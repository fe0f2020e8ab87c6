use chrono::{Days, NaiveDate};
use fibscope_core::config::IndicatorConfig;
use fibscope_core::indicator::entity::Column;
use fibscope_core::indicator::error::IndicatorError;
use fibscope_core::market::entity::PriceBar;
use fibscope_indicator::{Cell, Series, search_value_in_columns};

/// # Summary
/// 构造测试序列：收盘价由参数给定，其余字段围绕收盘价生成。
fn series_from_closes(closes: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = closes
        .iter()
        .zip(0_u32..)
        .map(|(&close, i)| PriceBar {
            date: start.checked_add_days(Days::new(u64::from(i))).unwrap(),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000_000.0 + 250_000.0 * f64::from(i % 3),
        })
        .collect();
    Series::new(bars)
}

fn enriched(closes: &[f64]) -> Series {
    let mut series = series_from_closes(closes);
    series.enrich(&IndicatorConfig::default()).unwrap();
    series
}

#[test]
fn test_enrich_adds_derived_columns_in_display_order() {
    let series = enriched(&[100.0, 102.0, 101.0]);
    let names: Vec<String> = series.columns().iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        vec![
            "Date",
            "Open",
            "High",
            "Low",
            "Close",
            "Volume",
            "% Difference",
            "Price Difference",
            "Volume Difference",
            "% Volume Difference",
            "RSI",
            "EMA5",
            "EMA14",
            "EMA26",
        ]
    );
}

#[test]
fn test_enrich_values() {
    let series = enriched(&[100.0, 102.0, 101.0]);

    let pct = series.numeric_column(Column::PctChange).unwrap().unwrap();
    assert_eq!(pct[0], None);
    assert!((pct[1].unwrap() - 2.0).abs() < 1e-9);

    let diff = series.numeric_column(Column::PriceDifference).unwrap().unwrap();
    assert_eq!(diff, vec![None, Some(2.0), Some(-1.0)]);

    // 成交量 1.0M -> 1.25M -> 1.5M，差值以百万计
    let vol = series.numeric_column(Column::VolumeDifference).unwrap().unwrap();
    assert_eq!(vol, vec![None, Some(0.25), Some(0.25)]);

    let rsi = series.numeric_column(Column::Rsi).unwrap().unwrap();
    assert!(rsi.iter().all(Option::is_none));

    let ema = series.numeric_column(Column::Ema(5)).unwrap().unwrap();
    assert_eq!(ema[0], Some(100.0));
}

#[test]
fn test_enrich_empty_series_is_noop() {
    let mut series = Series::new(Vec::new());
    series.enrich(&IndicatorConfig::default()).unwrap();
    assert!(series.is_empty());
    let found = search_value_in_columns(&series, 1.0, 1.0, &series.numeric_columns()).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_enrich_rejects_zero_period() {
    let mut series = series_from_closes(&[1.0, 2.0]);
    let config = IndicatorConfig {
        rsi_period: 0,
        ..IndicatorConfig::default()
    };
    assert_eq!(series.enrich(&config), Err(IndicatorError::InvalidPeriod(0)));
    // 失败时不留下部分派生列
    assert_eq!(series.columns(), Column::BASE.to_vec());
    assert_eq!(series, series_from_closes(&[1.0, 2.0]));
}

#[test]
fn test_enrich_rejects_zero_ema_span_without_partial_columns() {
    let mut series = series_from_closes(&[1.0, 2.0, 3.0]);
    let config = IndicatorConfig {
        ema_spans: vec![5, 0],
        ..IndicatorConfig::default()
    };
    assert_eq!(series.enrich(&config), Err(IndicatorError::InvalidPeriod(0)));
    assert!(!series.has_column(Column::PctChange));
    assert!(!series.has_column(Column::Ema(5)));

    series.enrich(&IndicatorConfig::default()).unwrap();
    assert!(series.has_column(Column::Ema(5)));
}

#[test]
fn test_base_columns_are_read_only() {
    let mut series = series_from_closes(&[1.0, 2.0]);
    assert_eq!(
        series.insert_column(Column::Close, vec![Some(0.0), Some(0.0)]),
        Err(IndicatorError::InvalidColumn(Column::Close))
    );
    assert_eq!(
        series.insert_column(Column::Rsi, vec![None]),
        Err(IndicatorError::LengthMismatch {
            column: Column::Rsi,
            expected: 2,
            actual: 1
        })
    );
}

#[test]
fn test_zero_tolerance_is_exact_match() {
    let series = enriched(&[10.0, 11.0, 12.0, 11.0, 10.0]);
    let found = search_value_in_columns(&series, 11.0, 0.0, &[Column::Close]).unwrap();
    assert_eq!(found.index(), &[1, 3]);
    assert!(found.bars().iter().all(|bar| bar.close == 11.0));
}

#[test]
fn test_columns_combine_with_or() {
    let series = enriched(&[10.0, 12.0, 30.0]);
    // High = close + 1, Low = close - 1
    let found = search_value_in_columns(&series, 13.0, 0.0, &[Column::High, Column::Low]).unwrap();
    assert_eq!(found.index(), &[1]);
    let found = search_value_in_columns(&series, 29.0, 0.0, &[Column::High, Column::Low]).unwrap();
    assert_eq!(found.index(), &[2]);
    // 第 0 行由 High 命中，第 1 行由 Low 命中
    let found = search_value_in_columns(&series, 11.0, 0.0, &[Column::Low, Column::High]).unwrap();
    assert_eq!(found.index(), &[0, 1]);
}

#[test]
fn test_tolerance_band_is_inclusive() {
    let series = enriched(&[10.0, 12.0, 14.0]);
    let found = search_value_in_columns(&series, 12.0, 2.0, &[Column::Close]).unwrap();
    assert_eq!(found.index(), &[0, 1, 2]);
}

#[test]
fn test_tolerance_is_monotonic() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i % 9) * 1.7).collect();
    let series = enriched(&closes);
    let columns = series.numeric_columns();

    let mut previous: Vec<usize> = Vec::new();
    for tolerance in [0.0, 0.5, 1.0, 2.5, 5.0, 10.0, 50.0] {
        let found = search_value_in_columns(&series, 104.0, tolerance, &columns).unwrap();
        let labels = found.index().to_vec();
        assert!(previous.iter().all(|label| labels.contains(label)), "tolerance {tolerance}");
        previous = labels;
    }
}

#[test]
fn test_non_numeric_and_empty_selection() {
    let series = enriched(&[10.0, 11.0]);
    let found = search_value_in_columns(&series, 10.0, 5.0, &[Column::Date]).unwrap();
    assert!(found.is_empty());

    let found = search_value_in_columns(&series, 10.0, 5.0, &[]).unwrap();
    assert!(found.is_empty());

    // Date 列被跳过，不会与 Close 的结果取交集
    let found = search_value_in_columns(&series, 10.0, 0.0, &[Column::Date, Column::Close]).unwrap();
    assert_eq!(found.index(), &[0]);
}

#[test]
fn test_undefined_cells_never_match() {
    let series = enriched(&[10.0, 11.0, 12.0]);
    let found = search_value_in_columns(&series, 0.0, 1_000.0, &[Column::Rsi]).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_missing_derived_column_is_error() {
    let series = series_from_closes(&[10.0, 11.0]);
    assert_eq!(
        search_value_in_columns(&series, 10.0, 1.0, &[Column::Rsi]),
        Err(IndicatorError::InvalidColumn(Column::Rsi))
    );
    let enriched = enriched(&[10.0, 11.0]);
    assert_eq!(
        search_value_in_columns(&enriched, 10.0, 1.0, &[Column::Ema(50)]),
        Err(IndicatorError::InvalidColumn(Column::Ema(50)))
    );
}

#[test]
fn test_invalid_tolerance() {
    let series = enriched(&[10.0]);
    assert_eq!(
        search_value_in_columns(&series, 10.0, -1.0, &[Column::Close]),
        Err(IndicatorError::InvalidTolerance(-1.0))
    );
    assert!(search_value_in_columns(&series, 10.0, f64::NAN, &[Column::Close]).is_err());
}

#[test]
fn test_result_keeps_all_columns_and_labels() {
    let series = enriched(&[10.0, 11.0, 12.0, 13.0]);
    let found = search_value_in_columns(&series, 12.0, 0.0, &[Column::Close]).unwrap();

    assert_eq!(found.columns(), series.columns());
    assert_eq!(found.index(), &[2]);
    assert_eq!(found.cell(0, Column::PriceDifference), Some(Cell::Number(Some(1.0))));
    assert_eq!(
        found.cell(0, Column::Date),
        Some(Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()))
    );

    let bar = found.bar_by_label(2).unwrap();
    assert_eq!(bar.high, 13.0);
    assert_eq!(bar.low, 11.0);
    assert_eq!(found.bar_by_label(0), Err(IndicatorError::RowNotFound(0)));
}
