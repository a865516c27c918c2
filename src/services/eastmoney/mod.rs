//! 东方财富行情适配器
//!
//! 对接 push2.eastmoney.com（K 线、分时、个股、批量）和 searchapi.eastmoney.com（搜索）
//!
//! ## 数据格式
//! - K 线/分时：`data.klines` / `data.trends` 为逗号拼接的 8 字段字符串
//! - 个股/批量：以 `f43`、`f58` 等字段编号为键，价格类为放大 100 倍的整数
//! - 搜索：`Data` 数组

mod client;
mod common;
mod kline;
mod quote;
mod search;
mod trend;

pub use client::{build_client, EastMoneyProvider};
pub use common::{QUOTE_API, SEARCH_API};

use anyhow::Result;
use chrono::NaiveDateTime;
use futures::future::BoxFuture;

use super::StockProvider;
use crate::models::{KLine, KLineType, MultiStock, Stock, StockDetail, Trend};

impl StockProvider for EastMoneyProvider {
    fn kline<'a>(
        &'a self,
        code: &'a str,
        kline_type: KLineType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BoxFuture<'a, Result<Vec<KLine>>> {
        Box::pin(self.fetch_kline(code, kline_type, start, end))
    }

    fn trend<'a>(
        &'a self,
        code: &'a str,
        day: u32,
        show_before: bool,
    ) -> BoxFuture<'a, Result<Vec<Trend>>> {
        Box::pin(self.fetch_trend(code, day, show_before))
    }

    fn search<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<Stock>>> {
        Box::pin(self.fetch_search(key))
    }

    fn stock<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<StockDetail>> {
        Box::pin(self.fetch_stock(code))
    }

    fn multi_stock<'a>(&'a self, codes: &'a [String]) -> BoxFuture<'a, Result<Vec<MultiStock>>> {
        Box::pin(self.fetch_multi_stock(codes))
    }
}
