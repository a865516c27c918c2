//! 接口查询参数
//!
//! 由 `web::Query` 反序列化，反序列化失败或 `validate` 不通过都返回 400

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use super::KLineType;

/// 请求中的时间格式
pub const REQUEST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// 分时接口允许的最大天数
pub const MAX_TREND_DAYS: u32 = 2;

fn default_day() -> u32 { 1 }

/// 分时查询参数
#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    /// 内部代码，如 1.600350
    pub code: String,
    /// 天数，不超过 2
    #[serde(default = "default_day")]
    pub day: u32,
    /// 是否包含盘前数据，接受 1/0、t/f、true/false
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub show_before: bool,
}

impl TrendRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_code(&self.code)?;
        if self.day > MAX_TREND_DAYS {
            return Err(format!(
                "day must be less than or equal to {}, got {}",
                MAX_TREND_DAYS, self.day
            ));
        }
        Ok(())
    }
}

/// K 线查询参数
#[derive(Debug, Deserialize)]
pub struct KLineRequest {
    pub code: String,
    /// 周期，缺省或为空时取 1h
    #[serde(rename = "type", default, deserialize_with = "deserialize_kline_type")]
    pub kline_type: KLineType,
    #[serde(deserialize_with = "deserialize_time")]
    pub start_time: NaiveDateTime,
    /// 缺省为当前北京时间
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub end_time: Option<NaiveDateTime>,
}

impl KLineRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_code(&self.code)
    }
}

/// 搜索参数
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub key: String,
}

/// 个股详情参数
#[derive(Debug, Deserialize)]
pub struct StockRequest {
    #[serde(default)]
    pub code: String,
}

/// 批量行情参数
///
/// 支持 `codes[]=a&codes[]=b` 与 `codes=a&codes=b` 两种写法，
/// `serde_urlencoded` 不支持重复键，因此直接解析原始查询串
#[derive(Debug, Default, PartialEq)]
pub struct MultiStockRequest {
    pub codes: Vec<String>,
}

impl MultiStockRequest {
    pub fn from_query(query: &str) -> Self {
        let codes = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| key == "codes" || key == "codes[]")
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        Self { codes }
    }
}

fn require_code(code: &str) -> Result<(), String> {
    if code.trim().is_empty() {
        return Err("code is required".to_string());
    }
    Ok(())
}

fn parse_time(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, REQUEST_TIME_FORMAT)
        .map_err(|e| format!("invalid time `{}`, expected YYYY-MM-DD HH:MM:SS: {}", value, e))
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_time(&value).map_err(serde::de::Error::custom)
}

fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            parse_time(&value).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(format!("invalid boolean `{}`, expected 1/0, t/f or true/false", value)),
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_flag(value.trim()).map_err(serde::de::Error::custom)
}

fn deserialize_kline_type<'de, D>(deserializer: D) -> Result<KLineType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    let value = value.trim();
    if value.is_empty() {
        return Ok(KLineType::default());
    }
    value.parse().map_err(serde::de::Error::custom)
}
