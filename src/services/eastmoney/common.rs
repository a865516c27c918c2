//! 公共常量和辅助函数

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

// ==================== 东方财富 API 常量 ====================

/// 行情接口根地址
pub const QUOTE_API: &str = "http://push2.eastmoney.com/api/";
/// 搜索接口根地址
pub const SEARCH_API: &str = "http://searchapi.eastmoney.com/api/";

/// K 线
pub const KLINE_PATH: &str = "qt/stock/kline/get";
/// 分时
pub const TREND_PATH: &str = "qt/stock/trends2/get";
/// 个股详情
pub const STOCK_PATH: &str = "qt/stock/get";
/// 批量行情
pub const MULTI_STOCK_PATH: &str = "qt/clist/get";
/// 搜索
pub const SEARCH_PATH: &str = "Info/Search";

/// 请求参数中的日期格式
pub const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// K 线与分时的每行都是 8 个逗号分隔字段
pub const ROW_FIELD_COUNT: usize = 8;

/// 上游响应外层结构，`data` 缺失或为 null 时为 None
///
/// 搜索接口使用大写的 `Data`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(alias = "Data")]
    pub data: Option<T>,
}

/// 放大 100 倍的整数还原为小数
pub fn scaled(raw: i64) -> f64 {
    raw as f64 / 100.0
}

/// 拆分一行数据并校验字段数
pub fn split_row(raw: &str) -> Result<Vec<&str>> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() != ROW_FIELD_COUNT {
        return Err(anyhow!(
            "数据行字段数为 {}，应为 {} [{}]",
            fields.len(),
            ROW_FIELD_COUNT,
            raw
        ));
    }
    Ok(fields)
}

/// 解析行内某个字段，错误信息包含字段名与原始行
pub fn parse_field<T>(fields: &[&str], index: usize, name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = fields
        .get(index)
        .ok_or_else(|| anyhow!("缺少 {} 字段 [{}]", name, raw))?;
    value
        .parse::<T>()
        .map_err(|e| anyhow!("{} 字段无效 `{}`: {} [{}]", name, value, e, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(1234), 12.34);
        assert_eq!(scaled(123), 1.23);
        assert_eq!(scaled(-250), -2.5);
        assert_eq!(scaled(0), 0.0);
    }

    #[test]
    fn test_split_row_field_count() {
        let row = "2024-01-02,10.00,10.50,10.60,9.90,1000,10500,5.0";
        assert_eq!(split_row(row).unwrap().len(), ROW_FIELD_COUNT);

        for bad in ["2024-01-02,10.00,10.50", "a,b,c,d,e,f,g,h,i"] {
            let err = split_row(bad).unwrap_err();
            assert!(err.to_string().contains(bad), "{}", err);
        }
    }

    #[test]
    fn test_parse_field_names_field_and_line() {
        let raw = "2024-01-02,abc,10.50,10.60,9.90,1000,10500,5.0";
        let fields = split_row(raw).unwrap();

        let close: f64 = parse_field(&fields, 2, "close", raw).unwrap();
        assert_eq!(close, 10.5);

        let err = parse_field::<f64>(&fields, 1, "open", raw).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("open"));
        assert!(message.contains(raw));
    }

    #[test]
    fn test_envelope_accepts_missing_null_and_capitalized() {
        let env: Envelope<Vec<i32>> = serde_json::from_str("{}").unwrap();
        assert!(env.data.is_none());
        let env: Envelope<Vec<i32>> = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(env.data.is_none());
        let env: Envelope<Vec<i32>> = serde_json::from_str(r#"{"Data": [1, 2]}"#).unwrap();
        assert_eq!(env.data, Some(vec![1, 2]));
    }
}
