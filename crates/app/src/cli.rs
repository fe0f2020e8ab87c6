use clap::Parser;
use fibscope_core::common::{Interval, Lookback};
use fibscope_core::config::{AppConfig, SourceKind};
use fibscope_core::indicator::entity::Column;
use fibscope_core::indicator::error::IndicatorError;
use std::path::PathBuf;

/// 命令行参数，所有取值都覆盖配置文件与环境变量。
#[derive(Parser, Debug)]
#[command(
    name = "fibscope",
    version,
    about = "Fibonacci levels, RSI and tolerance-band value search over historical price bars"
)]
pub struct Cli {
    /// Ticker symbol, e.g. ^GDAXI or AAPL
    #[arg(long)]
    pub ticker: Option<String>,

    /// History range: 1mo, 3mo, 6mo, 1y, 2y, 5y
    #[arg(long)]
    pub lookback: Option<Lookback>,

    /// Bar interval: 1d, 1wk, 1mo
    #[arg(long)]
    pub interval: Option<Interval>,

    /// Price source: yahoo or csv
    #[arg(long)]
    pub source: Option<SourceKind>,

    /// Directory holding {SYMBOL}.csv files for the csv source
    #[arg(long)]
    pub csv_dir: Option<String>,

    /// Target value to search for
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<f64>,

    /// Half-width of the search band, 0 means exact match
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Comma separated column names to search (default: all numeric columns)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Index label of the row anchoring the Fibonacci levels (default: first match)
    #[arg(long)]
    pub row: Option<usize>,

    /// Write the matched rows to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the Fibonacci levels as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Config file (default: ./fibscope.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// 把命令行上显式给出的值写回配置。
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ticker) = &self.ticker {
            config.market.ticker = ticker.clone();
        }
        if let Some(lookback) = self.lookback {
            config.market.lookback = lookback;
        }
        if let Some(interval) = self.interval {
            config.market.interval = interval;
        }
        if let Some(source) = self.source {
            config.market.source = source;
        }
        if let Some(dir) = &self.csv_dir {
            config.market.csv_dir = dir.clone();
        }
        if let Some(value) = self.value {
            config.search.value = value;
        }
        if let Some(tolerance) = self.tolerance {
            config.search.tolerance = tolerance;
        }
    }

    /// # Summary
    /// 解析 `--columns`。
    ///
    /// # Returns
    /// 未指定时为 `None` (由调用方回退到全部数值列)；存在无法识别的列名时返回 `UnknownColumn`。
    pub fn selected_columns(&self) -> Result<Option<Vec<Column>>, IndicatorError> {
        if self.columns.is_empty() {
            return Ok(None);
        }
        self.columns
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.parse::<Column>())
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "fibscope",
            "--ticker",
            "AAPL",
            "--lookback",
            "6mo",
            "--interval",
            "1wk",
            "--source",
            "csv",
            "--value",
            "-1.5",
            "--tolerance",
            "0",
        ]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.market.ticker, "AAPL");
        assert_eq!(config.market.lookback, Lookback::SixMonths);
        assert_eq!(config.market.interval, Interval::Week1);
        assert_eq!(config.market.source, SourceKind::Csv);
        assert_eq!(config.search.value, -1.5);
        assert_eq!(config.search.tolerance, 0.0);
        // 未给出的项保持原值
        assert_eq!(config.market.csv_dir, "data");
    }

    #[test]
    fn test_columns_parsing() {
        let cli = Cli::parse_from(["fibscope", "--columns", "Close,% Difference,EMA14,rsi"]);
        assert_eq!(
            cli.selected_columns().unwrap(),
            Some(vec![Column::Close, Column::PctChange, Column::Ema(14), Column::Rsi])
        );

        let cli = Cli::parse_from(["fibscope"]);
        assert_eq!(cli.selected_columns().unwrap(), None);

        let cli = Cli::parse_from(["fibscope", "--columns", "Close,Bogus"]);
        assert_eq!(
            cli.selected_columns(),
            Err(IndicatorError::UnknownColumn("Bogus".to_string()))
        );
    }

    #[test]
    fn test_invalid_interval_is_rejected() {
        assert!(Cli::try_parse_from(["fibscope", "--interval", "5m"]).is_err());
    }
}
