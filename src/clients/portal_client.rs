//! 考勤门户 HTTP 客户端
//!
//! 每名学生独立持有一个，cookie 和连接状态不会在学生之间共享

use crate::clients::identity::build_headers;
use crate::config::{Config, Endpoint};
use crate::error::PortalError;
use crate::utils::logging::truncate_text;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 服务器原文截取长度
const REPLY_PREVIEW_LEN: usize = 100;

/// 门户会话
pub struct PortalClient {
    client: reqwest::Client,
    user_agent: String,
}

/// 一次请求的响应
#[derive(Debug, Clone)]
pub struct PortalResponse {
    pub status: u16,
    pub body: String,
}

impl PortalClient {
    /// 创建新的门户会话
    ///
    /// # 参数
    /// - `config`: 配置（超时、User-Agent 池）
    /// - `agent_index`: User-Agent 在池中的位置
    pub fn new(config: &Config, agent_index: usize) -> Result<Self, PortalError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        let user_agent = config.user_agents.get(agent_index).cloned().unwrap_or_default();

        Ok(Self { client, user_agent })
    }

    /// 访问落地页以获取 cookie，响应内容不关心
    pub async fn prime(&self, endpoint: &Endpoint) -> Result<(), PortalError> {
        let headers = build_headers(&self.user_agent, endpoint, None)?;
        let url = endpoint.url();

        let response = self.client.get(&url).headers(headers).send().await?;
        debug!("预热请求 {} -> {}", url, response.status());
        Ok(())
    }

    /// 发送 JSON POST 请求
    ///
    /// # 参数
    /// - `endpoint`: 目标地址，请求头按它重新构造
    /// - `body`: 请求体
    /// - `bearer`: 可选的 token
    pub async fn post_json(
        &self,
        endpoint: &Endpoint,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<PortalResponse, PortalError> {
        let headers = build_headers(&self.user_agent, endpoint, bearer)?;
        let url = endpoint.url();

        let response = self.client.post(&url).headers(headers).json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("POST {} -> {} ({} 字节)", url, status, body.len());

        Ok(PortalResponse { status, body })
    }
}

impl PortalResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// 解析响应体
    pub fn json(&self) -> Result<Value, PortalError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// 服务器回复：优先 `message` / `msg` 字段，否则截取原文
    pub fn reply_text(&self) -> Option<String> {
        if let Ok(value) = serde_json::from_str::<Value>(&self.body) {
            for key in ["message", "msg"] {
                if let Some(text) = value.get(key).and_then(Value::as_str) {
                    return Some(text.to_string());
                }
            }
        }

        let raw = self.body.trim();
        if raw.is_empty() {
            None
        } else {
            Some(truncate_text(raw, REPLY_PREVIEW_LEN))
        }
    }
}
