//! 股票数据模型
//!
//! 定义行情查询返回的领域结构，所有结构均为单次请求内构造的只读值

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};

/// 日期格式（日/周/月 K 线、图表标签）
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 分钟精度时间格式（分时、日内 K 线）
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// 日内图表标签格式
pub const CLOCK_FORMAT: &str = "%H:%M";

/// K 线周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KLineType {
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
}

impl KLineType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5min",
            Self::FifteenMinutes => "15min",
            Self::ThirtyMinutes => "30min",
            Self::OneHour => "1h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
            Self::OneMonth => "1m",
        }
    }

    /// 日内周期的时间戳精确到分钟，其余只有日期
    pub const fn is_intraday(self) -> bool {
        matches!(
            self,
            Self::FiveMinutes | Self::FifteenMinutes | Self::ThirtyMinutes | Self::OneHour
        )
    }
}

impl FromStr for KLineType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "5min" => Ok(Self::FiveMinutes),
            "15min" => Ok(Self::FifteenMinutes),
            "30min" => Ok(Self::ThirtyMinutes),
            "1h" => Ok(Self::OneHour),
            "1d" => Ok(Self::OneDay),
            "1w" => Ok(Self::OneWeek),
            "1m" => Ok(Self::OneMonth),
            _ => Err(format!(
                "unknown kline type `{}`, expected one of 5min, 15min, 30min, 1h, 1d, 1w, 1m",
                value
            )),
        }
    }
}

impl fmt::Display for KLineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// K 线时间戳，精度由周期决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTime {
    Date(NaiveDate),
    Minute(NaiveDateTime),
}

impl BarTime {
    /// 图表标签：日内取时分，其余取日期
    pub fn label(&self) -> String {
        match self {
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
            Self::Minute(time) => time.format(CLOCK_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for BarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Minute(time) => write!(f, "{}", time.format(MINUTE_FORMAT)),
        }
    }
}

impl Serialize for BarTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// K 线（蜡烛图）数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KLine {
    /// 开盘价
    pub open: f64,
    /// 收盘价
    pub close: f64,
    /// 最高价
    pub high: f64,
    /// 最低价
    pub low: f64,
    /// 时间
    pub time: BarTime,
    /// 周期
    #[serde(rename = "type")]
    pub kline_type: KLineType,
}

/// 分时数据点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    /// 时间（分钟精度）
    #[serde(serialize_with = "serialize_minute")]
    pub time: NaiveDateTime,
    /// 价格
    pub price: f64,
    /// 成交量
    pub volume: i64,
    /// 相对昨收的涨跌幅 (price - pre_close) / pre_close
    pub percent: f64,
}

fn serialize_minute<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(MINUTE_FORMAT))
}

/// 股票基本标识
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stock {
    /// 名称
    pub name: String,
    /// 代码
    pub code: String,
    /// 带市场编号的内部代码，如 1.600350
    pub internal_code: String,
    /// 证券类型/板块
    #[serde(rename = "type")]
    pub stock_type: String,
}

impl Stock {
    /// 拼接内部代码 `<市场编号>.<代码>`
    pub fn internal_code(market: impl fmt::Display, code: &str) -> String {
        format!("{}.{}", market, code)
    }
}

/// 个股详情
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockDetail {
    #[serde(flatten)]
    pub stock: Stock,
    /// 涨跌幅
    pub percent_change: f64,
    /// 最高
    pub high: f64,
    /// 最低
    pub low: f64,
    /// 今开
    pub open: f64,
    /// 昨收
    pub pre_close: f64,
    /// 成交量
    pub trade_volume: f64,
    /// 成交额
    pub turnover_amount: f64,
    /// 量比
    pub quantity_ratio: f64,
    /// 涨停价
    pub limit_up: f64,
    /// 跌停价
    pub limit_down: f64,
    /// 流通市值
    pub circulation_value: f64,
    /// 总市值
    pub total_value: f64,
    /// 市净率
    pub pb_ratio: f64,
    /// 换手率
    pub turnover_rate: f64,
}

/// 批量行情中的单只股票
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiStock {
    #[serde(flatten)]
    pub stock: Stock,
    /// 现价
    pub price: f64,
    pub percent_change: f64,
    pub trade_volume: f64,
    pub turnover_amount: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub pre_close: f64,
    pub total_value: f64,
    pub circulation_value: f64,
    pub pb_ratio: f64,
}

/// 供前端绘图的 K 线：标签序列与 [open, close, high, low] 序列一一对应
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KLineChart {
    pub labels: Vec<String>,
    pub values: Vec<[f64; 4]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kline_type_labels_round_trip() {
        for kline_type in [
            KLineType::FiveMinutes,
            KLineType::FifteenMinutes,
            KLineType::ThirtyMinutes,
            KLineType::OneHour,
            KLineType::OneDay,
            KLineType::OneWeek,
            KLineType::OneMonth,
        ] {
            let json = serde_json::to_string(&kline_type).unwrap();
            assert_eq!(json, format!("\"{}\"", kline_type.as_str()));
            let back: KLineType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kline_type);
            assert_eq!(kline_type.as_str().parse::<KLineType>(), Ok(kline_type));
        }
        assert_eq!(KLineType::default(), KLineType::OneHour);
        assert!("2h".parse::<KLineType>().is_err());
    }

    #[test]
    fn test_bar_time_format_follows_precision() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let minute = date.and_hms_opt(10, 30, 0).unwrap();

        assert_eq!(BarTime::Date(date).to_string(), "2024-01-02");
        assert_eq!(BarTime::Minute(minute).to_string(), "2024-01-02 10:30");
        assert_eq!(BarTime::Date(date).label(), "2024-01-02");
        assert_eq!(BarTime::Minute(minute).label(), "10:30");
    }

    #[test]
    fn test_stock_detail_flattens_identity() {
        let detail = StockDetail {
            stock: Stock {
                name: "Foo".to_string(),
                code: "600350".to_string(),
                internal_code: Stock::internal_code(1, "600350"),
                stock_type: "沪A".to_string(),
            },
            percent_change: 1.23,
            ..Default::default()
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["name"], "Foo");
        assert_eq!(value["internal_code"], "1.600350");
        assert_eq!(value["type"], "沪A");
        assert_eq!(value["percent_change"], 1.23);
    }

    #[test]
    fn test_trend_serializes_minute_time() {
        let trend = Trend {
            time: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 31, 0)
                .unwrap(),
            price: 10.5,
            volume: 300,
            percent: f64::INFINITY,
        };

        let value = serde_json::to_value(&trend).unwrap();
        assert_eq!(value["time"], "2024-01-02 09:31");
        assert!(value["percent"].is_null());
    }
}
