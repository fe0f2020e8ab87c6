//! # `fibscope` - 命令行入口
//!
//! 抓取历史 K 线，派生指标列，按容差检索数值，并以命中行的高低点计算斐波那契价位。

mod cli;
mod logging;
mod pipeline;
mod settings;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use fibscope_core::config::{AppConfig, SourceKind};
use fibscope_core::indicator::entity::Column;
use fibscope_core::market::port::PriceSource;
use fibscope_feed::csv_file::CsvFileProvider;
use fibscope_feed::yahoo::YahooProvider;
use fibscope_report::export::{export_series_csv, levels_to_json};
use fibscope_report::summary::render_anchor_summary;
use fibscope_report::table::{render_levels_table, render_series_table};
use pipeline::{AnalysisReport, AnalysisRequest, Analyzer};
use std::sync::Arc;
use tracing::info;

/// 检索结果表格中固定展示的列。
const RESULT_COLUMNS: [Column; 8] = [
    Column::Date,
    Column::Open,
    Column::High,
    Column::Low,
    Column::Close,
    Column::PctChange,
    Column::PriceDifference,
    Column::Rsi,
];

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
///
/// # Logic
/// 1. 解析命令行，分层加载配置并应用命令行覆盖。
/// 2. 初始化全局日志。
/// 3. 按配置实例化行情源，注入 `Analyzer`。
/// 4. 执行分析并输出表格、可选的 CSV 与 JSON。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 配置
    let cli = Cli::parse();
    let mut config = settings::load_config(cli.config.as_deref()).context("Failed to load config")?;
    cli.apply(&mut config);

    // 2. 日志，guard 需存活到 main 结束
    let _log_guard = logging::init_logging(&config.log)?;
    info!(
        ticker = %config.market.ticker,
        source = ?config.market.source,
        "fibscope starting..."
    );

    // 3. 基础设施层
    let source = build_source(&config)?;
    let analyzer = Analyzer::new(source, config.indicator.clone());

    // 4. 执行与输出
    let request = AnalysisRequest::from_config(&config, cli.selected_columns()?, cli.row);
    let report = analyzer.run(&request).await?;
    print_report(&report, &config, cli.json)?;

    if let Some(path) = &cli.export {
        export_series_csv(&report.matches, path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
    }
    Ok(())
}

fn build_source(config: &AppConfig) -> anyhow::Result<Arc<dyn PriceSource>> {
    let source: Arc<dyn PriceSource> = match config.market.source {
        SourceKind::Yahoo => Arc::new(YahooProvider::new(&config.market)?),
        SourceKind::Csv => Arc::new(CsvFileProvider::new(&config.market.csv_dir)),
    };
    Ok(source)
}

fn print_report(report: &AnalysisReport, config: &AppConfig, json: bool) -> anyhow::Result<()> {
    if json {
        if let Some(levels) = &report.levels {
            println!("{}", levels_to_json(levels)?);
        }
        return Ok(());
    }

    let searched: Vec<String> = report.searched.iter().map(ToString::to_string).collect();
    println!(
        "{} of {} rows matching {} ± {} in [{}]",
        report.matches.len(),
        report.series.len(),
        config.search.value,
        config.search.tolerance,
        searched.join(", ")
    );
    print!("{}", render_series_table(&report.matches, &RESULT_COLUMNS));

    if let (Some(label), Some(levels)) = (report.anchor, &report.levels) {
        println!();
        print!("{}", render_anchor_summary(&report.matches, label, &config.indicator)?);
        print!("{}", render_levels_table(levels));
    }
    Ok(())
}
