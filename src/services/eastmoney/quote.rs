//! 个股详情与批量行情
//!
//! 上游以数字字段编号返回，价格类字段为放大 100 倍的整数。
//! 字段名大小写不固定，同时接受 `f43` 与 `F43`。

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::common::{scaled, Envelope, MULTI_STOCK_PATH, STOCK_PATH};
use super::EastMoneyProvider;
use crate::models::{MultiStock, Stock, StockDetail};

// f43 涨幅 f44 最高 f45 最低 f46 今开 f60 昨收 f47 成交量 f48 成交额 f50 量比 f51 涨停 f52 跌停
// f57 代码 f58 名称 f107 市场 f116 总市值 f117 流通值 f128 板块 f167 市净率 f168 换手
const STOCK_FIELDS: &str = "f43,f44,f45,f46,f47,f48,f50,f51,f52,f57,f58,f60,f107,f110,f116,f117,f128,f167,f168";

// f2 现价 f3 涨幅 f5 成交量 f6 成交额 f9 市盈 f12 代码 f13 市场 f14 名称 f15 最高 f16 最低
// f17 今开 f18 昨收 f20 总市值 f21 流通市值 f23 市净率
const MULTI_STOCK_FIELDS: &str = "f2,f3,f5,f6,f9,f12,f13,f14,f15,f16,f17,f18,f19,f20,f21,f22,f23";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StockFields {
    #[serde(alias = "F43")]
    f43: i64,
    #[serde(alias = "F44")]
    f44: i64,
    #[serde(alias = "F45")]
    f45: i64,
    #[serde(alias = "F46")]
    f46: i64,
    #[serde(alias = "F47")]
    f47: i64,
    #[serde(alias = "F48")]
    f48: f64,
    #[serde(alias = "F50")]
    f50: i64,
    #[serde(alias = "F51")]
    f51: i64,
    #[serde(alias = "F52")]
    f52: i64,
    #[serde(alias = "F57")]
    f57: String,
    #[serde(alias = "F58")]
    f58: String,
    #[serde(alias = "F60")]
    f60: i64,
    #[serde(alias = "F107")]
    f107: i64,
    #[serde(alias = "F116")]
    f116: f64,
    #[serde(alias = "F117")]
    f117: f64,
    #[serde(alias = "F128")]
    f128: String,
    #[serde(alias = "F167")]
    f167: i64,
    #[serde(alias = "F168")]
    f168: i64,
}

impl From<StockFields> for StockDetail {
    fn from(f: StockFields) -> Self {
        StockDetail {
            stock: Stock {
                internal_code: Stock::internal_code(f.f107, &f.f57),
                name: f.f58,
                code: f.f57,
                stock_type: f.f128,
            },
            percent_change: scaled(f.f43),
            high: scaled(f.f44),
            low: scaled(f.f45),
            open: scaled(f.f46),
            pre_close: scaled(f.f60),
            trade_volume: scaled(f.f47),
            turnover_amount: f.f48,
            quantity_ratio: scaled(f.f50),
            limit_up: scaled(f.f51),
            limit_down: scaled(f.f52),
            circulation_value: f.f117,
            total_value: f.f116,
            pb_ratio: scaled(f.f167),
            turnover_rate: f.f168 as f64,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MultiStockFields {
    #[serde(alias = "F2")]
    f2: i64,
    #[serde(alias = "F3")]
    f3: i64,
    #[serde(alias = "F5")]
    f5: i64,
    #[serde(alias = "F6")]
    f6: f64,
    #[serde(alias = "F12")]
    f12: String,
    #[serde(alias = "F13")]
    f13: i64,
    #[serde(alias = "F14")]
    f14: String,
    #[serde(alias = "F15")]
    f15: i64,
    #[serde(alias = "F16")]
    f16: i64,
    #[serde(alias = "F17")]
    f17: i64,
    #[serde(alias = "F18")]
    f18: i64,
    #[serde(alias = "F20")]
    f20: i64,
    #[serde(alias = "F21")]
    f21: i64,
    #[serde(alias = "F23")]
    f23: i64,
}

impl From<MultiStockFields> for MultiStock {
    fn from(f: MultiStockFields) -> Self {
        MultiStock {
            stock: Stock {
                internal_code: Stock::internal_code(f.f13, &f.f12),
                name: f.f14,
                code: f.f12,
                stock_type: String::new(),
            },
            price: scaled(f.f2),
            percent_change: scaled(f.f3),
            trade_volume: scaled(f.f5),
            turnover_amount: f.f6,
            high: scaled(f.f15),
            low: scaled(f.f16),
            open: scaled(f.f17),
            pre_close: scaled(f.f18),
            total_value: scaled(f.f20),
            circulation_value: scaled(f.f21),
            pb_ratio: scaled(f.f23),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MultiStockData {
    #[serde(default)]
    diff: Value,
}

/// `diff` 通常是以序号为键的对象，分页参数生效时上游会改为数组。
/// 逐条解码，出错时带上记录键与字段
fn parse_diff(diff: &Value) -> Result<Vec<MultiStock>> {
    match diff {
        Value::Null => Ok(Vec::new()),
        Value::Object(records) => records
            .iter()
            .map(|(key, record)| parse_record(key, record))
            .collect(),
        Value::Array(records) => records
            .iter()
            .enumerate()
            .map(|(index, record)| parse_record(&index.to_string(), record))
            .collect(),
        other => bail!("diff 应为对象或数组: {}", other),
    }
}

fn parse_record(key: &str, record: &Value) -> Result<MultiStock> {
    match MultiStockFields::deserialize(record) {
        Ok(fields) => Ok(MultiStock::from(fields)),
        Err(e) => match invalid_field(record) {
            Some((name, value)) => Err(anyhow!("diff[{}] {} 字段无效 `{}`: {}", key, name, value, e)),
            None => Err(anyhow!("diff[{}] 记录无效: {}", key, e)),
        },
    }
}

/// 找出第一个无法单独解码的字段
fn invalid_field(record: &Value) -> Option<(&str, &Value)> {
    record.as_object()?.iter().find_map(|(name, value)| {
        let single = Value::Object(Map::from_iter([(name.clone(), value.clone())]));
        MultiStockFields::deserialize(&single)
            .is_err()
            .then_some((name.as_str(), value))
    })
}

fn multi_stock_params(codes: &[String]) -> Vec<(&'static str, String)> {
    let fs = codes
        .iter()
        .map(|code| format!("i:{}", code))
        .collect::<Vec<_>>()
        .join(",");
    vec![
        ("pi", "0".to_string()),
        ("pz", codes.len().to_string()),
        ("fs", fs),
        ("fields", MULTI_STOCK_FIELDS.to_string()),
    ]
}

impl EastMoneyProvider {
    pub(super) async fn fetch_stock(&self, code: &str) -> Result<StockDetail> {
        let params = [
            ("secid", code.to_string()),
            ("fields", STOCK_FIELDS.to_string()),
        ];
        let envelope: Envelope<StockFields> = self
            .get_json(self.quote_api(), STOCK_PATH, &params)
            .await
            .with_context(|| format!("stock 请求失败: secid={}", code))?;

        Ok(envelope.data.map(StockDetail::from).unwrap_or_default())
    }

    /// 所有代码合并为一次请求
    pub(super) async fn fetch_multi_stock(&self, codes: &[String]) -> Result<Vec<MultiStock>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let params = multi_stock_params(codes);
        let envelope: Envelope<MultiStockData> = self
            .get_json(self.quote_api(), MULTI_STOCK_PATH, &params)
            .await
            .with_context(|| format!("multi_stock 请求失败: codes={:?}", codes))?;

        let stocks = match envelope.data {
            Some(data) => parse_diff(&data.diff)
                .with_context(|| format!("multi_stock 数据解析失败: codes={:?}", codes))?,
            None => Vec::new(),
        };
        log::debug!("📊 批量行情返回 {} 只股票", stocks.len());
        Ok(stocks)
    }
}
