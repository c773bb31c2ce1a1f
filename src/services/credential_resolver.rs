//! 凭证解析服务 - 业务能力层
//!
//! 只负责"拿到一个 token"，不关心签到

use crate::clients::PortalClient;
use crate::config::{Config, Endpoint};
use crate::error::FailureKind;
use crate::models::{AuthResult, StudentRecord};
use crate::services::token_decoder::decode_token;
use serde_json::{json, Value};
use tracing::{debug, warn};

pub const METHOD_MANUAL_TOKEN: &str = "manual token";
pub const METHOD_NO_CREDENTIALS: &str = "no credentials";
pub const METHOD_TOKEN_ABSENT: &str = "login succeeded but no token issued";

/// 凭证解析服务
///
/// 职责：
/// - 有 token 直接使用，不做任何网络请求，也不向服务器校验
/// - 有账号密码时按候选地址顺序登录，逐个尝试，互不影响
/// - 两者都没有时立即失败
pub struct CredentialResolver {
    login_endpoints: Vec<Endpoint>,
    priming_endpoint: Option<Endpoint>,
}

/// 单次登录尝试的失败记录
struct AttemptFailure {
    kind: FailureKind,
    label: String,
    http_status: Option<u16>,
    reply: Option<String>,
}

impl AttemptFailure {
    fn into_auth(self) -> AuthResult {
        AuthResult::failed(self.kind, self.label, self.http_status).with_reply(self.reply)
    }
}

impl CredentialResolver {
    /// 创建新的凭证解析服务
    pub fn new(config: &Config) -> Self {
        Self {
            login_endpoints: config.login_endpoints.clone(),
            priming_endpoint: config.priming_url.as_deref().and_then(Endpoint::parse),
        }
    }

    /// 为一名学生解析 token
    ///
    /// # 参数
    /// - `student`: 学生记录
    /// - `client`: 该学生独占的会话
    pub async fn resolve(&self, student: &StudentRecord, client: &PortalClient) -> AuthResult {
        if let Some(token) = student.manual_token() {
            return AuthResult::resolved(token, METHOD_MANUAL_TOKEN);
        }

        let Some((user, pass)) = student.credentials() else {
            return AuthResult::failed(FailureKind::CredentialMissing, METHOD_NO_CREDENTIALS, None);
        };

        self.prime(client).await;

        let payload = json!({
            "username": user,
            "password": pass,
            "user_type": "Student"
        });

        let mut last_failure = AttemptFailure {
            kind: FailureKind::LoginRejected,
            label: "no login endpoint configured".to_string(),
            http_status: None,
            reply: None,
        };

        for endpoint in &self.login_endpoints {
            match self.attempt(client, endpoint, &payload).await {
                Ok(token) => {
                    return AuthResult::resolved(token, format!("login via {}", endpoint.url()));
                }
                Err(failure) if failure.kind == FailureKind::TokenAbsent => {
                    return failure.into_auth();
                }
                Err(failure) => {
                    warn!("[{}] 登录失败 ({}): {}", student.name, endpoint.url(), failure.label);
                    last_failure = failure;
                }
            }
        }

        last_failure.into_auth()
    }

    /// 登录前预热，失败不影响后续流程
    async fn prime(&self, client: &PortalClient) {
        if let Some(endpoint) = &self.priming_endpoint {
            if let Err(e) = client.prime(endpoint).await {
                debug!("预热请求失败，忽略: {}", e);
            }
        }
    }

    /// 对单个地址尝试一次登录
    async fn attempt(&self, client: &PortalClient, endpoint: &Endpoint, payload: &Value) -> Result<String, AttemptFailure> {
        let response = client
            .post_json(endpoint, payload, None)
            .await
            .map_err(|e| AttemptFailure {
                kind: FailureKind::TransportError,
                label: format!("Login Error: {}", e),
                http_status: None,
                reply: None,
            })?;

        if !response.is_ok() {
            return Err(AttemptFailure {
                kind: FailureKind::LoginRejected,
                label: format!("Login Failed ({})", response.status),
                http_status: Some(response.status),
                reply: response.reply_text(),
            });
        }

        let body = response.json().map_err(|e| AttemptFailure {
            kind: FailureKind::TransportError,
            label: format!("Login Error: {}", e),
            http_status: Some(response.status),
            reply: response.reply_text(),
        })?;

        decode_token(&body).ok_or_else(|| AttemptFailure {
            kind: FailureKind::TokenAbsent,
            label: METHOD_TOKEN_ABSENT.to_string(),
            http_status: Some(response.status),
            reply: response.reply_text(),
        })
    }
}
