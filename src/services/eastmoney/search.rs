//! 股票搜索

use anyhow::{Context, Result};
use serde::Deserialize;

use super::common::{Envelope, SEARCH_PATH};
use super::EastMoneyProvider;
use crate::models::Stock;

/// 每次只取第一页
const SEARCH_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "MktNum", default)]
    market: String,
    #[serde(rename = "SecurityTypeName", default)]
    security_type: String,
}

impl From<SearchItem> for Stock {
    fn from(item: SearchItem) -> Self {
        Stock {
            internal_code: Stock::internal_code(&item.market, &item.code),
            name: item.name,
            code: item.code,
            stock_type: item.security_type,
        }
    }
}

fn query_params(key: &str) -> Vec<(&'static str, String)> {
    vec![
        ("and14", format!("MultiMatch/Name,Code,PinYin/{}/true", key)),
        ("type", "14".to_string()),
        ("appid", "el1902262".to_string()),
        ("token", "CCSDCZSDCXYMYZYYSYYXSMDDSMDHHDJT".to_string()),
        ("returnfields14", "Name,Code,MktNum,SecurityTypeName".to_string()),
        ("pageIndex14", "1".to_string()),
        ("pageSize14", SEARCH_PAGE_SIZE.to_string()),
    ]
}

impl EastMoneyProvider {
    pub(super) async fn fetch_search(&self, key: &str) -> Result<Vec<Stock>> {
        let params = query_params(key);
        let envelope: Envelope<Vec<SearchItem>> = self
            .get_json(self.search_api(), SEARCH_PATH, &params)
            .await
            .with_context(|| format!("search 请求失败: key={}", key))?;

        let stocks: Vec<Stock> = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Stock::from)
            .collect();
        log::debug!("🔍 {} 搜索到 {} 只股票", key, stocks.len());
        Ok(stocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::eastmoney::client::tests::{json_response, provider_for, stub_upstream};

    #[test]
    fn test_query_params_multi_match() {
        let params = query_params("600350");
        assert!(params.contains(&("and14", "MultiMatch/Name,Code,PinYin/600350/true".to_string())));
        assert!(params.contains(&("pageIndex14", "1".to_string())));
        assert!(params.contains(&("pageSize14", "20".to_string())));
    }

    #[test]
    fn test_item_to_stock() {
        let item: SearchItem = serde_json::from_str(
            r#"{"Name":"山东高速","Code":"600350","MktNum":"1","SecurityTypeName":"沪A"}"#,
        )
        .unwrap();
        let stock = Stock::from(item);
        assert_eq!(stock.name, "山东高速");
        assert_eq!(stock.code, "600350");
        assert_eq!(stock.internal_code, "1.600350");
        assert_eq!(stock.stock_type, "沪A");
    }

    #[tokio::test]
    async fn test_fetch_search_end_to_end() {
        let body = r#"{"Data":[{"Name":"东方财富","Code":"300059","MktNum":"0","SecurityTypeName":"深A"}],"Status":0}"#;
        let (base, upstream) = stub_upstream(json_response(body)).await;
        let provider = provider_for(&base);

        let stocks = provider.fetch_search("dfcf").await.unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].internal_code, "0.300059");

        let request = upstream.await.unwrap();
        assert!(request.contains("/api/Info/Search?"));
    }

    #[tokio::test]
    async fn test_fetch_search_no_match() {
        let (base, upstream) = stub_upstream(json_response(r#"{"Data":null,"Status":0}"#)).await;
        let provider = provider_for(&base);

        assert!(provider.fetch_search("zzzz").await.unwrap().is_empty());
        upstream.await.unwrap();
    }
}
