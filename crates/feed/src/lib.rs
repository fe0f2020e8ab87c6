//! # `fibscope-feed` - 行情数据源
//!
//! `PriceSource` 端口的两个实现：
//! - [`yahoo::YahooProvider`]：Yahoo Finance v8 chart 接口。
//! - [`csv_file::CsvFileProvider`]：本地 `{SYMBOL}.csv` 文件，用于离线分析。

pub mod csv_file;
pub mod resample;
pub mod yahoo;
