use crate::error::ReportError;
use crate::format::format_cell;
use fibscope_indicator::{FibonacciLevelSet, Series};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// # Summary
/// 将序列写为 CSV。
///
/// # Logic
/// 1. 表头为全部列的展示名，不含行标签。
/// 2. 数值保留两位小数，日期为 ISO-8601，未定义为空。
///
/// # Arguments
/// * `series`: 待导出序列。
/// * `writer`: 任意输出目标。
pub fn write_series_csv<W: Write>(series: &Series, writer: W) -> Result<(), ReportError> {
    let columns = series.columns();
    let mut csv_writer = csv::Writer::from_writer(writer);

    let header: Vec<String> = columns.iter().map(ToString::to_string).collect();
    csv_writer.write_record(&header)?;

    for position in 0..series.len() {
        let record: Vec<String> = columns
            .iter()
            .map(|&column| format_cell(series.cell(position, column)))
            .collect();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// 导出序列到文件，已存在时覆盖。
pub fn export_series_csv(series: &Series, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path)?;
    write_series_csv(series, file)?;
    info!(path = %path.display(), rows = series.len(), "Exported series to CSV");
    Ok(())
}

/// 价位集合的 JSON 文本 (完整精度)。
pub fn levels_to_json(levels: &FibonacciLevelSet) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(levels)?)
}
