use crate::format::{format_cell, format_number};
use fibscope_core::indicator::entity::Column;
use fibscope_indicator::{FibonacciLevelSet, Series};

/// 黄金分割位标签，表格下方单独提示。
pub const GOLDEN_RATIO_LABEL: &str = "Retracement 61.8%";

/// # Summary
/// 把序列渲染为右对齐的文本表格。
///
/// # Logic
/// 1. 首列为原始行标签，其余列按 `columns` 顺序排列。
/// 2. 每列宽度取表头与所有单元格的最大值。
/// 3. 没有任何行时在表头下输出 `(no rows)`。
///
/// # Arguments
/// * `series`: 待渲染序列。
/// * `columns`: 展示的列，尚未派生的列渲染为空。
pub fn render_series_table(series: &Series, columns: &[Column]) -> String {
    let mut header = vec!["#".to_string()];
    header.extend(columns.iter().map(ToString::to_string));

    let rows: Vec<Vec<String>> = series
        .index()
        .iter()
        .enumerate()
        .map(|(position, label)| {
            let mut row = vec![label.to_string()];
            row.extend(
                columns
                    .iter()
                    .map(|&column| format_cell(series.cell(position, column))),
            );
            row
        })
        .collect();

    let mut out = render_grid(&header, &rows);
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

/// # Summary
/// 渲染斐波那契价位表，并在末尾提示黄金分割位。
pub fn render_levels_table(levels: &FibonacciLevelSet) -> String {
    let header = vec!["Level".to_string(), "Price".to_string()];
    let rows: Vec<Vec<String>> = levels
        .iter()
        .map(|level| vec![level.label.clone(), format_number(Some(level.price))])
        .collect();

    let mut out = render_grid(&header, &rows);
    if let Some(price) = levels.get(GOLDEN_RATIO_LABEL) {
        out.push_str(&format!("Golden ratio 61.8%: {}\n", format_number(Some(price))));
    }
    out
}

fn render_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, title)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(title.chars().count(), usize::max)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        let mut text = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:>width$}", cell))
            .collect::<Vec<_>>()
            .join("  ");
        text.push('\n');
        text
    };

    let mut out = line(header);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&line(&rule));
    for row in rows {
        out.push_str(&line(row));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_alignment() {
        let header = vec!["A".to_string(), "Long".to_string()];
        let rows = vec![vec!["123".to_string(), "1".to_string()]];
        assert_eq!(render_grid(&header, &rows), "  A  Long\n---  ----\n123     1\n");
    }
}
