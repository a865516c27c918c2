//! 分时数据

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::common::{parse_field, split_row, Envelope, TREND_PATH};
use super::EastMoneyProvider;
use crate::models::{Trend, MINUTE_FORMAT};

#[derive(Debug, Deserialize)]
struct TrendData {
    /// 昨收，整个序列共用
    #[serde(rename = "preClose", default)]
    pre_close: f64,
    #[serde(default)]
    trends: Vec<String>,
}

fn query_params(code: &str, day: u32, show_before: bool) -> Vec<(&'static str, String)> {
    vec![
        ("secid", code.to_string()),
        ("fields1", "f1,f2,f3,f4,f5,f6,f7,f8,f9,f10,f11,f12,f13".to_string()),
        ("fields2", "f51,f52,f53,f54,f55,f56,f57,f58".to_string()),
        ("iscr", if show_before { "1" } else { "0" }.to_string()),
        ("ndays", day.to_string()),
    ]
}

/// 只取第 0 列时间、第 2 列价格、第 5 列成交量
///
/// 昨收为 0 时不做保护，涨跌幅为 inf 或 NaN
fn parse_row(raw: &str, pre_close: f64) -> Result<Trend> {
    let fields = split_row(raw)?;
    let time = NaiveDateTime::parse_from_str(fields[0], MINUTE_FORMAT)
        .map_err(|e| anyhow!("time 字段无效 `{}`: {} [{}]", fields[0], e, raw))?;
    let price: f64 = parse_field(&fields, 2, "price", raw)?;
    let volume: i64 = parse_field(&fields, 5, "volume", raw)?;

    Ok(Trend {
        time,
        price,
        volume,
        percent: (price - pre_close) / pre_close,
    })
}

fn parse_trends(rows: &[String], pre_close: f64) -> Result<Vec<Trend>> {
    rows.iter().map(|raw| parse_row(raw, pre_close)).collect()
}

impl EastMoneyProvider {
    pub(super) async fn fetch_trend(
        &self,
        code: &str,
        day: u32,
        show_before: bool,
    ) -> Result<Vec<Trend>> {
        let params = query_params(code, day, show_before);
        let envelope: Envelope<TrendData> = self
            .get_json(self.quote_api(), TREND_PATH, &params)
            .await
            .with_context(|| format!("trend 请求失败: secid={}", code))?;

        let Some(data) = envelope.data else {
            return Ok(Vec::new());
        };
        let trends = parse_trends(&data.trends, data.pre_close)
            .with_context(|| format!("trend 数据解析失败: secid={}", code))?;
        log::debug!("📈 {} 解析到 {} 条分时数据", code, trends.len());
        Ok(trends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::eastmoney::client::tests::{json_response, provider_for, stub_upstream};

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_query_params_flags() {
        let params = query_params("1.600350", 2, true);
        assert!(params.contains(&("iscr", "1".to_string())));
        assert!(params.contains(&("ndays", "2".to_string())));

        let params = query_params("1.600350", 1, false);
        assert!(params.contains(&("iscr", "0".to_string())));
    }

    #[test]
    fn test_percent_uses_series_pre_close() {
        let trends = parse_trends(
            &rows(&[
                "2024-01-02 09:31,10.10,11.00,11.00,10.90,300,3300.0,10.95",
                "2024-01-02 09:32,11.00,9.00,11.00,9.00,120,1080.0,10.50",
            ]),
            10.0,
        )
        .unwrap();

        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].price, 11.0);
        assert_eq!(trends[0].volume, 300);
        assert_eq!(trends[0].percent, (11.0 - 10.0) / 10.0);
        assert_eq!(trends[1].percent, (9.0 - 10.0) / 10.0);
        assert_eq!(trends[0].time.format(MINUTE_FORMAT).to_string(), "2024-01-02 09:31");
    }

    #[test]
    fn test_zero_pre_close_propagates_division() {
        let trends = parse_trends(
            &rows(&[
                "2024-01-02 09:31,10.10,11.00,11.00,10.90,300,3300.0,10.95",
                "2024-01-02 09:32,0,0,0,0,0,0,0",
            ]),
            0.0,
        )
        .unwrap();
        assert!(trends[0].percent.is_infinite());
        assert!(trends[1].percent.is_nan());
    }

    #[test]
    fn test_row_errors_name_line() {
        let short = "2024-01-02 09:31,10.10,11.00";
        let err = parse_trends(&rows(&[short]), 10.0).unwrap_err();
        assert!(err.to_string().contains(short));

        let long = "2024-01-02 09:31,10.10,11.00,11.00,10.90,300,3300.0,10.95,1";
        let err = parse_trends(&rows(&[long]), 10.0).unwrap_err();
        assert!(err.to_string().contains("字段数为 9"));
        assert!(err.to_string().contains(long));

        let bad_volume = "2024-01-02 09:31,10.10,11.00,11.00,10.90,3.5,3300.0,10.95";
        let err = parse_trends(&rows(&[bad_volume]), 10.0).unwrap_err();
        assert!(err.to_string().contains("volume"));
        assert!(err.to_string().contains(bad_volume));

        let bad_time = "2024-01-02,10.10,11.00,11.00,10.90,300,3300.0,10.95";
        let err = parse_trends(&rows(&[bad_time]), 10.0).unwrap_err();
        assert!(err.to_string().contains("time"));
    }

    #[tokio::test]
    async fn test_fetch_trend_end_to_end() {
        let body = r#"{"data":{"preClose":10.0,"trends":["2024-01-02 09:31,10.10,11.00,11.00,10.90,300,3300.0,10.95"]}}"#;
        let (base, upstream) = stub_upstream(json_response(body)).await;
        let provider = provider_for(&base);

        let trends = provider.fetch_trend("1.600350", 1, true).await.unwrap();
        assert_eq!(trends.len(), 1);
        assert!((trends[0].percent - 0.1).abs() < 1e-12);

        let request = upstream.await.unwrap();
        assert!(request.contains("/api/qt/stock/trends2/get?"));
        assert!(request.contains("iscr=1"));
    }

    #[tokio::test]
    async fn test_fetch_trend_empty() {
        let (base, upstream) =
            stub_upstream(json_response(r#"{"data":{"preClose":10.0,"trends":[]}}"#)).await;
        let provider = provider_for(&base);

        assert!(provider.fetch_trend("1.600350", 1, false).await.unwrap().is_empty());
        upstream.await.unwrap();
    }
}
