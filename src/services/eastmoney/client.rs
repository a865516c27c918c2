//! 东方财富 HTTP 客户端
//!
//! 所有请求都是带查询参数的 GET，响应为 JSON

use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::UpstreamConfig;

/// 创建访问上游的 HTTP 客户端
///
/// 固定超时，遇到任何重定向直接报错，不跟随
pub fn build_client(config: &UpstreamConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(REFERER, HeaderValue::from_static("https://quote.eastmoney.com/"));

    let mut builder = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::custom(|attempt| attempt.error("redirect disabled")));
    if !config.system_proxy {
        builder = builder.no_proxy();
    }
    builder.build().context("创建上游 HTTP 客户端失败")
}

/// 东方财富行情数据源
///
/// 客户端由调用方构造后注入，多个请求共享同一实例
#[derive(Debug, Clone)]
pub struct EastMoneyProvider {
    client: Client,
    quote_api: Url,
    search_api: Url,
}

impl EastMoneyProvider {
    pub fn new(client: Client, config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client,
            quote_api: parse_base_url(&config.quote_api)?,
            search_api: parse_base_url(&config.search_api)?,
        })
    }

    pub(super) fn quote_api(&self) -> &Url {
        &self.quote_api
    }

    pub(super) fn search_api(&self) -> &Url {
        &self.search_api
    }

    /// 发送 GET 请求并把响应体解析为 `T`
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        base: &Url,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = base
            .join(path)
            .with_context(|| format!("拼接请求地址失败: {}{}", base, path))?;
        log::debug!("📡 GET {} {:?}", url, params);

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .send()
            .await
            .with_context(|| format!("请求 {} 失败", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("请求 {} 返回状态码 {}", url, status));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("读取 {} 响应失败", url))?;
        serde_json::from_str(&body).with_context(|| format!("解析 {} 响应 JSON 失败", url))
    }
}

/// 解析根地址，补全末尾的 `/` 以便 `join` 拼接相对路径
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).with_context(|| format!("无效的上游地址: {}", raw))
}
