//! 股票接口处理器
//!
//! ## API 列表
//! - GET /api/trend - 分时数据
//! - GET /api/kline - K 线图表数据
//! - GET /api/search - 股票搜索
//! - GET /api/stock - 个股详情
//! - GET /api/multi_stock - 批量行情
//!
//! 参数错误返回 400 及具体原因；上游失败只在日志中记录原因，客户端统一收到 500

use actix_web::{web, HttpRequest, HttpResponse, Result};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Asia::Shanghai;

use crate::models::{
    ApiResponse, ErrorResponse, KLineRequest, MultiStockRequest, SearchRequest, StockRequest,
    TrendRequest,
};
use crate::services::StockService;

/// 当前北京时间
fn beijing_now() -> NaiveDateTime {
    Utc::now().with_timezone(&Shanghai).naive_local()
}

fn bad_request(msg: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::bad_request(msg))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::internal())
}

/// 获取分时数据
///
/// GET /api/trend?code=1.600350&day=1&show_before=false
pub async fn trend(
    service: web::Data<StockService>,
    query: web::Query<TrendRequest>,
) -> Result<HttpResponse> {
    let params = query.into_inner();
    if let Err(msg) = params.validate() {
        return Ok(bad_request(msg));
    }

    match service.trend(&params.code, params.day, params.show_before).await {
        Ok(trends) => Ok(HttpResponse::Ok().json(ApiResponse::list(trends))),
        Err(e) => {
            log::error!(
                "trend 失败 code={} day={} show_before={}: {:#}",
                params.code,
                params.day,
                params.show_before,
                e
            );
            Ok(internal_error())
        }
    }
}

/// 获取 K 线图表数据
///
/// GET /api/kline?code=1.600350&type=1d&start_time=2024-01-01 00:00:00
pub async fn kline(
    service: web::Data<StockService>,
    query: web::Query<KLineRequest>,
) -> Result<HttpResponse> {
    let params = query.into_inner();
    if let Err(msg) = params.validate() {
        return Ok(bad_request(msg));
    }
    let end_time = params.end_time.unwrap_or_else(beijing_now);

    match service
        .kline(&params.code, params.kline_type, params.start_time, end_time)
        .await
    {
        Ok(chart) => Ok(HttpResponse::Ok().json(ApiResponse::data(chart))),
        Err(e) => {
            log::error!(
                "kline 失败 code={} type={} start_time={} end_time={}: {:#}",
                params.code,
                params.kline_type,
                params.start_time,
                end_time,
                e
            );
            Ok(internal_error())
        }
    }
}

/// 搜索股票
///
/// GET /api/search?key=600350
pub async fn search(
    service: web::Data<StockService>,
    query: web::Query<SearchRequest>,
) -> Result<HttpResponse> {
    match service.search(&query.key).await {
        Ok(stocks) => Ok(HttpResponse::Ok().json(ApiResponse::list(stocks))),
        Err(e) => {
            log::error!("search 失败 key={}: {:#}", query.key, e);
            Ok(internal_error())
        }
    }
}

/// 获取个股详情
///
/// GET /api/stock?code=0.300059
pub async fn stock(
    service: web::Data<StockService>,
    query: web::Query<StockRequest>,
) -> Result<HttpResponse> {
    match service.stock(&query.code).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::data(detail))),
        Err(e) => {
            log::error!("stock 失败 code={}: {:#}", query.code, e);
            Ok(internal_error())
        }
    }
}

/// 批量获取行情
///
/// GET /api/multi_stock?codes[]=0.300059&codes[]=1.600350
pub async fn multi_stock(
    service: web::Data<StockService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let params = MultiStockRequest::from_query(req.query_string());

    match service.multi_stock(&params.codes).await {
        Ok(stocks) => Ok(HttpResponse::Ok().json(ApiResponse::list(stocks))),
        Err(e) => {
            log::error!("multi_stock 失败 codes={:?}: {:#}", params.codes, e);
            Ok(internal_error())
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/trend", web::get().to(trend))
        .route("/kline", web::get().to(kline))
        .route("/search", web::get().to(search))
        .route("/stock", web::get().to(stock))
        .route("/multi_stock", web::get().to(multi_stock));
}
