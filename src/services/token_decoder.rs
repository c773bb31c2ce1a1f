//! token 解码 - 业务能力层
//!
//! 登录接口在不同部署下返回的结构不一致，按固定顺序尝试几条路径，取第一个非空字符串

use serde_json::Value;

/// 查找顺序：`data.token` → `token` → `access_token`
pub const TOKEN_PATHS: &[&[&str]] = &[&["data", "token"], &["token"], &["access_token"]];

/// 从登录响应中取出 token
pub fn decode_token(body: &Value) -> Option<String> {
    decode_with_paths(body, TOKEN_PATHS)
}

/// 按给定路径顺序查找，命中第一个非空字符串即返回
pub fn decode_with_paths(body: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| {
        let found = path.iter().try_fold(body, |node, key| node.get(*key))?;
        found
            .as_str()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_token_first() {
        let body = json!({"data": {"token": "nested"}, "token": "top", "access_token": "oauth"});
        assert_eq!(decode_token(&body).as_deref(), Some("nested"));
    }

    #[test]
    fn test_access_token_only() {
        let body = json!({"access_token": "T3", "token_type": "bearer"});
        assert_eq!(decode_token(&body).as_deref(), Some("T3"));
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let body = json!({"data": {"token": ""}, "token": null, "access_token": "T4"});
        assert_eq!(decode_token(&body).as_deref(), Some("T4"));
    }

    #[test]
    fn test_non_string_token_is_ignored() {
        let body = json!({"data": {"token": 42}, "token": {"value": "x"}});
        assert_eq!(decode_token(&body), None);
    }

    #[test]
    fn test_data_without_token() {
        let body = json!({"data": {"user": "u"}, "token": "top"});
        assert_eq!(decode_token(&body).as_deref(), Some("top"));
        assert_eq!(decode_token(&json!({"data": null})), None);
    }
}
