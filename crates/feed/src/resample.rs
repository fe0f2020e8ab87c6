use chrono::{Datelike, Days, Months, NaiveDate};
use fibscope_core::common::{Interval, Lookback};
use fibscope_core::market::entity::PriceBar;

/// # Summary
/// 将日线聚合为目标周期的 K 线。
///
/// # Logic
/// 1. 周线以所在周的周一为日期，月线以当月 1 日为日期。
/// 2. 同一区间内：开盘取首根，最高取最大，最低取最小，收盘取末根，成交量求和。
///
/// # Arguments
/// * `bars`: 按日期升序排列的日线。
/// * `interval`: 目标周期，`Day1` 原样返回。
pub fn resample(bars: &[PriceBar], interval: Interval) -> Vec<PriceBar> {
    if interval == Interval::Day1 {
        return bars.to_vec();
    }

    let mut out: Vec<PriceBar> = Vec::new();
    for bar in bars {
        let start = bucket_start(bar.date, interval);
        match out.last_mut() {
            Some(current) if current.date == start => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.volume += bar.volume;
            }
            _ => out.push(PriceBar { date: start, ..*bar }),
        }
    }
    out
}

fn bucket_start(date: NaiveDate, interval: Interval) -> NaiveDate {
    match interval {
        Interval::Day1 => date,
        Interval::Week1 => date
            .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            .unwrap_or(date),
        Interval::Month1 => date.with_day(1).unwrap_or(date),
    }
}

/// # Summary
/// 只保留最后一根 K 线之前 `lookback` 个月内的数据。
///
/// 截止日期本身不包含在内；日期下溢时原样返回。
pub fn trim_to_lookback(bars: Vec<PriceBar>, lookback: Lookback) -> Vec<PriceBar> {
    let Some(last) = bars.last().map(|bar| bar.date) else {
        return bars;
    };
    let Some(cutoff) = last.checked_sub_months(Months::new(lookback.months())) else {
        return bars;
    };
    bars.into_iter().filter(|bar| bar.date > cutoff).collect()
}
