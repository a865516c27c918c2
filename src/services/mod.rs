//! 业务逻辑服务模块
//!
//! 封装上游数据获取与结果整形

pub mod eastmoney;      // 东方财富适配器
pub mod provider;       // 数据源能力接口
pub mod stock_service;  // 股票查询服务

pub use provider::StockProvider;
pub use stock_service::StockService;
