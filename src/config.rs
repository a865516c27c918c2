//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::eastmoney::{QUOTE_API, SEARCH_API};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "STOCK_GATEWAY_CONFIG";

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游行情接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 行情接口根地址（K 线、分时、个股、批量）
    #[serde(default = "default_quote_api")]
    pub quote_api: String,
    /// 搜索接口根地址
    #[serde(default = "default_search_api")]
    pub search_api: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 是否使用 HTTP_PROXY 等环境变量中的系统代理
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 上游配置
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_quote_api() -> String { QUOTE_API.to_string() }
fn default_search_api() -> String { SEARCH_API.to_string() }
fn default_timeout() -> u64 { 15 }
fn default_connect_timeout() -> u64 { 10 }
fn default_system_proxy() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            quote_api: default_quote_api(),
            search_api: default_search_api(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            system_proxy: default_system_proxy(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件 {} 失败", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 {} 失败", path.display()))?;
        Ok(config)
    }

    /// 查找配置文件：环境变量指定的路径优先，其次 config.json、config/config.json
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ["config.json", "config/config.json"]
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// 加载配置，找不到文件时使用默认值；文件存在但无法解析视为启动错误
    ///
    /// 在日志初始化之前调用，因此这里不打日志
    pub fn load() -> anyhow::Result<Self> {
        match Self::locate() {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
