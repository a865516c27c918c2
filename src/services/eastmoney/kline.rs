//! K 线数据

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::common::{parse_field, split_row, Envelope, KLINE_PATH, QUERY_DATE_FORMAT};
use super::EastMoneyProvider;
use crate::models::{BarTime, KLine, KLineType, DATE_FORMAT, MINUTE_FORMAT};

#[derive(Debug, Deserialize)]
struct KLineData {
    #[serde(default)]
    klines: Vec<String>,
}

/// 周期到上游 klt 参数的映射
fn klt(kline_type: KLineType) -> &'static str {
    match kline_type {
        KLineType::FiveMinutes => "5",
        KLineType::FifteenMinutes => "15",
        KLineType::ThirtyMinutes => "30",
        KLineType::OneHour => "60",
        KLineType::OneDay => "101",
        KLineType::OneWeek => "102",
        KLineType::OneMonth => "103",
    }
}

fn query_params(
    code: &str,
    kline_type: KLineType,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<(&'static str, String)> {
    vec![
        ("secid", code.to_string()),
        ("fields1", "f1,f2,f3,f4,f5".to_string()),
        ("fields2", "f51,f52,f53,f54,f55,f56,f57,f58".to_string()),
        ("klt", klt(kline_type).to_string()),
        ("fqt", "0".to_string()),
        ("beg", start.format(QUERY_DATE_FORMAT).to_string()),
        ("end", end.format(QUERY_DATE_FORMAT).to_string()),
    ]
}

/// 解析 `时间,开,收,高,低,量,额,振幅` 格式的一行
fn parse_row(raw: &str, kline_type: KLineType) -> Result<KLine> {
    let fields = split_row(raw)?;

    let time = if kline_type.is_intraday() {
        NaiveDateTime::parse_from_str(fields[0], MINUTE_FORMAT).map(BarTime::Minute)
    } else {
        NaiveDate::parse_from_str(fields[0], DATE_FORMAT).map(BarTime::Date)
    }
    .map_err(|e| anyhow!("time 字段无效 `{}`: {} [{}]", fields[0], e, raw))?;

    Ok(KLine {
        open: parse_field(&fields, 1, "open", raw)?,
        close: parse_field(&fields, 2, "close", raw)?,
        high: parse_field(&fields, 3, "high", raw)?,
        low: parse_field(&fields, 4, "low", raw)?,
        time,
        kline_type,
    })
}

fn parse_klines(rows: &[String], kline_type: KLineType) -> Result<Vec<KLine>> {
    rows.iter().map(|raw| parse_row(raw, kline_type)).collect()
}

impl EastMoneyProvider {
    pub(super) async fn fetch_kline(
        &self,
        code: &str,
        kline_type: KLineType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<KLine>> {
        let params = query_params(code, kline_type, start, end);
        let envelope: Envelope<KLineData> = self
            .get_json(self.quote_api(), KLINE_PATH, &params)
            .await
            .with_context(|| format!("kline 请求失败: secid={}", code))?;

        let rows = envelope.data.map(|d| d.klines).unwrap_or_default();
        let klines = parse_klines(&rows, kline_type)
            .with_context(|| format!("kline 数据解析失败: secid={} type={}", code, kline_type))?;
        log::debug!("📈 {} 解析到 {} 条K线数据", code, klines.len());
        Ok(klines)
    }
}
