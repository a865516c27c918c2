//! 股票行情网关
//!
//! 将分时、K 线、搜索、个股详情、批量行情查询转发给东方财富，
//! 整理为稳定的 JSON 结构后对外提供

mod config;     // 配置加载
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 数据源适配与查询服务

use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use env_logger::Env;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::eastmoney::{build_client, EastMoneyProvider};
use crate::services::StockService;

/// 应用程序入口
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match AppConfig::locate() {
        Some(path) => log::info!("从 {} 加载配置", path.display()),
        None => log::info!("使用默认配置"),
    }

    let client = build_client(&config.upstream)?;
    let provider = EastMoneyProvider::new(client, &config.upstream)?;
    let service = web::Data::new(StockService::new(Arc::new(provider)));

    let bind_addr = config.bind_addr();
    log::info!("启动股票行情网关，监听 {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(handlers::cors())
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(service.clone())
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_addr)
        .with_context(|| format!("绑定 {} 失败", bind_addr))?
        .run()
        .await?;
    Ok(())
}
