//! 请求身份头
//!
//! 每次请求都按目标主机重新构造，切换主机时不复用上一次的头

use crate::config::Endpoint;
use crate::error::PortalError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};

/// 构造发往 `endpoint` 的请求头
///
/// # 参数
/// - `user_agent`: 当前单元分到的 User-Agent
/// - `endpoint`: 目标地址，决定 Origin / Referer
/// - `bearer`: 签到时携带的 token
pub fn build_headers(user_agent: &str, endpoint: &Endpoint, bearer: Option<&str>) -> Result<HeaderMap, PortalError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("User-Agent", user_agent)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ORIGIN, header_value("Origin", endpoint.origin())?);
    headers.insert(REFERER, header_value("Referer", &endpoint.referer())?);

    if let Some(token) = bearer {
        headers.insert(AUTHORIZATION, header_value("Authorization", &format!("Bearer {}", token))?);
    }

    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, PortalError> {
    HeaderValue::from_str(value).map_err(|e| PortalError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}
