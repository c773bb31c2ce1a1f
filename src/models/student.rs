use crate::error::{AppError, FailureKind, InputError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 名单中的一名学生
///
/// `token` 和 (`user` + `pass`) 二选一，两者都有时优先使用 `token`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl StudentRecord {
    /// 使用预先签发的 token
    pub fn with_token(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// 使用账号密码
    pub fn with_credentials(name: impl Into<String>, user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user: Some(user.into()),
            pass: Some(pass.into()),
            ..Default::default()
        }
    }

    /// 去掉首尾空白后的非空 token
    pub fn manual_token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// 非空的账号密码
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (non_blank(self.user.as_deref()), non_blank(self.pass.as_deref())) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// 二维码内容
///
/// 同一批次里所有学生共用同一个值，只读共享
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload(Arc<str>);

impl QrPayload {
    pub fn new(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::Input(InputError::EmptyQrPayload));
        }
        Ok(Self(Arc::from(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 凭证解析结果
///
/// `method_label` 只用于诊断；流程上只看 `token` 是否存在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub token: Option<String>,
    pub method_label: String,
    /// 失败分类（有 token 时为 None）
    pub failure: Option<FailureKind>,
    /// 最后一次登录请求的 HTTP 状态码
    pub http_status: Option<u16>,
    /// 最后一次登录请求的服务器回复
    pub server_reply: Option<String>,
}

impl AuthResult {
    pub fn resolved(token: impl Into<String>, method_label: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            method_label: method_label.into(),
            failure: None,
            http_status: None,
            server_reply: None,
        }
    }

    pub fn failed(kind: FailureKind, method_label: impl Into<String>, http_status: Option<u16>) -> Self {
        Self {
            token: None,
            method_label: method_label.into(),
            failure: Some(kind),
            http_status,
            server_reply: None,
        }
    }

    pub fn with_reply(mut self, server_reply: Option<String>) -> Self {
        self.server_reply = server_reply;
        self
    }
}
