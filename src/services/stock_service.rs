//! 股票查询服务
//!
//! 直接转发给注入的数据源，只有 K 线会额外整形为图表结构

use anyhow::Result;
use chrono::NaiveDateTime;
use std::sync::Arc;

use super::StockProvider;
use crate::models::{KLine, KLineChart, KLineType, MultiStock, Stock, StockDetail, Trend};

/// 股票查询服务，在各 worker 间共享
#[derive(Clone)]
pub struct StockService {
    provider: Arc<dyn StockProvider>,
}

impl StockService {
    pub fn new(provider: Arc<dyn StockProvider>) -> Self {
        Self { provider }
    }

    pub async fn trend(&self, code: &str, day: u32, show_before: bool) -> Result<Vec<Trend>> {
        self.provider.trend(code, day, show_before).await
    }

    /// K 线图表数据
    pub async fn kline(
        &self,
        code: &str,
        kline_type: KLineType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<KLineChart> {
        let bars = self.provider.kline(code, kline_type, start, end).await?;
        Ok(to_chart(&bars))
    }

    pub async fn search(&self, key: &str) -> Result<Vec<Stock>> {
        self.provider.search(key).await
    }

    pub async fn stock(&self, code: &str) -> Result<StockDetail> {
        self.provider.stock(code).await
    }

    pub async fn multi_stock(&self, codes: &[String]) -> Result<Vec<MultiStock>> {
        self.provider.multi_stock(codes).await
    }
}

/// 拆成标签序列和 `[open, close, high, low]` 序列，保持 K 线顺序
pub fn to_chart(bars: &[KLine]) -> KLineChart {
    let (labels, values) = bars
        .iter()
        .map(|bar| (bar.time.label(), [bar.open, bar.close, bar.high, bar.low]))
        .unzip();
    KLineChart { labels, values }
}
