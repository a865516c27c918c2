//! 行情数据源能力接口
//!
//! 网关只依赖这组操作，东方财富适配器是目前唯一的实现

use anyhow::Result;
use chrono::NaiveDateTime;
use futures::future::BoxFuture;

use crate::models::{KLine, KLineType, MultiStock, Stock, StockDetail, Trend};

/// 行情数据源
///
/// 每个操作对应一次上游请求；失败即整体失败，不返回部分结果
pub trait StockProvider: Send + Sync {
    /// K 线，时间范围按日期截取
    fn kline<'a>(
        &'a self,
        code: &'a str,
        kline_type: KLineType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BoxFuture<'a, Result<Vec<KLine>>>;

    /// 分时，`show_before` 表示包含盘前数据
    fn trend<'a>(
        &'a self,
        code: &'a str,
        day: u32,
        show_before: bool,
    ) -> BoxFuture<'a, Result<Vec<Trend>>>;

    /// 按名称、代码、拼音模糊搜索
    fn search<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<Stock>>>;

    /// 个股详情
    fn stock<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<StockDetail>>;

    /// 批量行情，结果顺序不保证与输入一致
    fn multi_stock<'a>(&'a self, codes: &'a [String]) -> BoxFuture<'a, Result<Vec<MultiStock>>>;
}
