use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use fibscope_core::common::{Interval, Lookback, Ticker};
use fibscope_core::config::MarketConfig;
use fibscope_core::market::entity::PriceBar;
use fibscope_core::market::error::MarketError;
use fibscope_core::market::port::PriceSource;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，超时与 User-Agent 来自 `MarketConfig`。
/// - 只请求按 `range` 回溯的历史 K 线，不做实时订阅。
#[derive(Clone)]
pub struct YahooProvider {
    // 内部使用的 HTTP 客户端
    client: Client,
}

impl YahooProvider {
    /// # Summary
    /// 创建一个新的 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 安装 rustls 的 ring 加密后端 (已安装时忽略)。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    /// 3. 按配置的超时初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 行情配置。
    ///
    /// # Returns
    /// 客户端构建失败时返回 `MarketError::Network`。
    pub fn new(config: &MarketConfig) -> Result<Self, MarketError> {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }

        let mut headers = reqwest::header::HeaderMap::new();
        let user_agent = reqwest::header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| MarketError::Unknown(format!("Invalid user agent: {}", e)))?;
        headers.insert(reqwest::header::USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    // 例如 "Not Found"
    code: String,
    description: String,
}

#[derive(Deserialize, Debug)]
struct YahooResult {
    meta: YahooMeta,
    // 无成交数据时该字段缺失
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    // 交易所相对 UTC 的秒数偏移
    #[serde(default)]
    gmtoffset: i64,
    #[serde(default)]
    symbol: String,
}

#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

/// # Summary
/// Yahoo API 原始报价数据。
///
/// # Invariants
/// - 各列表与 `timestamp` 等长，任一位置都可能为 null。
#[derive(Deserialize, Debug)]
struct YahooQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// # Summary
/// 解析 Yahoo v8 chart 接口的响应体。
///
/// # Logic
/// 1. 接口返回业务错误时，"Not Found" 映射为 `NotFound`，其余为 `Unknown`。
/// 2. 时间戳加上交易所偏移后取本地日期，作为 K 线日期。
/// 3. OHLCV 任一字段缺失的行整体丢弃。
/// 4. 同一日期出现多次 (盘中实时 K 线) 时保留最后一条。
///
/// # Arguments
/// * `body`: 响应体 JSON 文本。
///
/// # Returns
/// 按日期升序排列的 K 线。
pub fn parse_chart_response(body: &str) -> Result<Vec<PriceBar>, MarketError> {
    let json: YahooResponse =
        serde_json::from_str(body).map_err(|e| MarketError::Parse(e.to_string()))?;

    if let Some(err) = json.chart.error {
        return Err(if err.code == "Not Found" {
            MarketError::NotFound(err.description)
        } else {
            MarketError::Unknown(err.description)
        });
    }

    let result = json
        .chart
        .result
        .and_then(|mut results| results.pop())
        .ok_or_else(|| MarketError::NotFound("Empty chart result".into()))?;

    let Some(quote) = result.indicators.quote.first() else {
        return Ok(Vec::new());
    };

    let mut bars: Vec<PriceBar> = Vec::with_capacity(result.timestamp.len());
    let mut dropped = 0_usize;
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let row = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
            local_date(ts, result.meta.gmtoffset),
        );
        let (Some(open), Some(high), Some(low), Some(close), Some(volume), Some(date)) = row else {
            dropped += 1;
            continue;
        };

        let bar = PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        };
        match bars.last_mut() {
            Some(last) if last.date == date => *last = bar,
            _ => bars.push(bar),
        }
    }

    bars.sort_by_key(|bar| bar.date);
    if dropped > 0 {
        debug!(symbol = %result.meta.symbol, dropped, "Dropped incomplete Yahoo rows");
    }
    Ok(bars)
}

fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}

#[async_trait]
impl PriceSource for YahooProvider {
    /// # Summary
    /// 从 Yahoo Finance 抓取回溯窗口内的历史 K 线。
    ///
    /// # Logic
    /// 1. 以 `range` + `interval` 构造查询，周期聚合由 Yahoo 完成。
    /// 2. HTTP 404 视为标的不存在，其余非 2xx 视为网络错误。
    /// 3. 响应体交给 `parse_chart_response` 解析。
    async fn fetch_bars(
        &self,
        ticker: &Ticker,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<Vec<PriceBar>, MarketError> {
        let url = format!("{}/{}", CHART_URL, ticker.symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("range", lookback.as_str()),
                ("interval", interval.as_str()),
                ("includePrePost", "false"),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketError::NotFound(ticker.to_string()));
        }
        if !status.is_success() {
            return Err(MarketError::Network(format!("HTTP {}", status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;
        let bars = parse_chart_response(&body)?;

        info!(
            ticker = %ticker,
            %interval,
            %lookback,
            bars = bars.len(),
            "Fetched price history from Yahoo"
        );
        Ok(bars)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}
