/// 单个目标地址（host + path）
///
/// 登录和签到都是按顺序尝试的候选地址列表，同一套逻辑遍历，不再为每个变体写一份代码
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// 主机地址，例如 `https://api.camu.in`
    pub host: String,
    /// 接口路径，例如 `/api/login`
    pub path: String,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            path: path.into(),
        }
    }

    /// 从完整 URL 拆出主机和路径，无法解析或没有主机时返回 None
    pub fn parse(url: &str) -> Option<Self> {
        let parsed = reqwest::Url::parse(url.trim()).ok()?;
        parsed.host_str()?;
        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }
        Some(Self::new(parsed.origin().ascii_serialization(), path))
    }

    /// 完整请求地址
    pub fn url(&self) -> String {
        format!("{}{}", self.host, self.path)
    }

    /// 该主机对应的 Origin 头
    pub fn origin(&self) -> &str {
        &self.host
    }

    /// 该主机对应的 Referer 头
    pub fn referer(&self) -> String {
        format!("{}/", self.host)
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的学生数量
    pub max_concurrency: usize,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// 签到前的固定延迟（毫秒）
    pub pre_mark_delay_ms: u64,
    /// 登录候选地址，按顺序尝试
    pub login_endpoints: Vec<Endpoint>,
    /// 签到主地址
    pub mark_endpoint: Endpoint,
    /// 签到主地址返回 404 时使用的备用地址
    pub mark_fallback_endpoint: Endpoint,
    /// 登录前预热的页面，仅用于获取 cookie
    pub priming_url: Option<String>,
    pub latitude: String,
    pub longitude: String,
    /// User-Agent 轮换池
    pub user_agents: Vec<String>,
    /// 名单文件
    pub roster_file: String,
    /// 输出报告文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 是否使用系统代理（HTTP_PROXY 等环境变量）
    pub use_system_proxy: bool,
}

const DEFAULT_BASE_URL: &str = "https://api.camu.in";
const DEFAULT_FALLBACK_BASE_URL: &str = "https://www.camu.in";

const DEFAULT_USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (iPhone; CPU iPhone OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.6 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 13; SM-S918B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
];

impl Default for Config {
    fn default() -> Self {
        Self::for_hosts(DEFAULT_BASE_URL, DEFAULT_FALLBACK_BASE_URL)
    }
}

impl Config {
    /// 由主站和备用站两个主机推导出全部候选地址
    pub fn for_hosts(base_url: &str, fallback_base_url: &str) -> Self {
        let fallback = fallback_base_url.trim_end_matches('/');
        Self {
            max_concurrency: 5,
            request_timeout_secs: 5,
            pre_mark_delay_ms: 100,
            login_endpoints: vec![
                Endpoint::new(base_url, "/api/login"),
                Endpoint::new(base_url, "/v2/login"),
                Endpoint::new(fallback, "/api/login"),
            ],
            mark_endpoint: Endpoint::new(base_url, "/api/instruction/mark_attendance_qr"),
            mark_fallback_endpoint: Endpoint::new(fallback, "/api/instruction/mark_attendance_qr"),
            priming_url: Some(format!("{}/", fallback)),
            latitude: "28.4744".to_string(),
            longitude: "77.5040".to_string(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            roster_file: "squad.toml".to_string(),
            output_log_file: "attendance_report.txt".to_string(),
            verbose_logging: false,
            use_system_proxy: true,
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let fallback_base_url = std::env::var("FALLBACK_BASE_URL").unwrap_or_else(|_| DEFAULT_FALLBACK_BASE_URL.to_string());
        let default = Self::for_hosts(&base_url, &fallback_base_url);
        Self {
            max_concurrency: env_parse("MAX_CONCURRENCY").unwrap_or(default.max_concurrency).max(1),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS").unwrap_or(default.request_timeout_secs),
            pre_mark_delay_ms: env_parse("PRE_MARK_DELAY_MS").unwrap_or(default.pre_mark_delay_ms),
            priming_url: match std::env::var("PRIMING_URL") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v),
                Err(_) => default.priming_url.clone(),
            },
            latitude: std::env::var("LATITUDE").unwrap_or(default.latitude.clone()),
            longitude: std::env::var("LONGITUDE").unwrap_or(default.longitude.clone()),
            roster_file: std::env::var("ROSTER_FILE").unwrap_or(default.roster_file.clone()),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file.clone()),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            use_system_proxy: env_parse("USE_SYSTEM_PROXY").unwrap_or(default.use_system_proxy),
            ..default
        }
    }

    /// 根据单元序号挑选 User-Agent
    pub fn agent_index(&self, unit_index: usize) -> usize {
        if self.user_agents.is_empty() {
            0
        } else {
            unit_index % self.user_agents.len()
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints_order() {
        let config = Config::default();
        let urls: Vec<String> = config.login_endpoints.iter().map(Endpoint::url).collect();
        assert_eq!(
            urls,
            vec![
                "https://api.camu.in/api/login",
                "https://api.camu.in/v2/login",
                "https://www.camu.in/api/login",
            ]
        );
        assert_eq!(config.mark_endpoint.url(), "https://api.camu.in/api/instruction/mark_attendance_qr");
        assert_eq!(config.mark_fallback_endpoint.origin(), "https://www.camu.in");
        assert_eq!(config.max_concurrency, 5);
    }

    #[test]
    fn test_for_hosts_trims_trailing_slash() {
        let config = Config::for_hosts("http://127.0.0.1:9000/", "http://127.0.0.1:9001/");
        assert_eq!(config.login_endpoints[0].url(), "http://127.0.0.1:9000/api/login");
        assert_eq!(config.mark_fallback_endpoint.referer(), "http://127.0.0.1:9001/");
        assert_eq!(config.priming_url.as_deref(), Some("http://127.0.0.1:9001/"));
    }

    #[test]
    fn test_parse_splits_host_and_path() {
        let endpoint = Endpoint::parse("http://127.0.0.1:9001/").unwrap();
        assert_eq!(endpoint.origin(), "http://127.0.0.1:9001");
        assert_eq!(endpoint.referer(), "http://127.0.0.1:9001/");
        assert_eq!(endpoint.url(), "http://127.0.0.1:9001/");

        let endpoint = Endpoint::parse("https://www.camu.in/login?next=home").unwrap();
        assert_eq!(endpoint.host, "https://www.camu.in");
        assert_eq!(endpoint.path, "/login?next=home");

        assert_eq!(Endpoint::parse("not a url"), None);
    }

    #[test]
    fn test_agent_index_rotates() {
        let config = Config::default();
        let indexes: Vec<usize> = (0..6).map(|i| config.agent_index(i)).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 0, 1]);
    }
}
