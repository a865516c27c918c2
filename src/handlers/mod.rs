pub mod health;
pub mod stock;

use actix_cors::Cors;
use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .configure(health::config)
        .service(web::scope("/api").configure(stock::config));
}

/// 允许任意来源跨域访问，并应答预检请求
pub fn cors() -> Cors {
    Cors::permissive()
}

/// 查询参数绑定失败统一返回 400
fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(err.to_string()));
    InternalError::from_response(err, response).into()
}
