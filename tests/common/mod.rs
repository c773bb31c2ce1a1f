//! 测试用的模拟考勤门户
//!
//! 在 127.0.0.1 随机端口上启动 axum 服务，记录每类请求的次数、请求头和并发峰值

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use squad_attendance::Config;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const LOGIN_PATH: &str = "/api/login";
pub const LOGIN_V2_PATH: &str = "/v2/login";
pub const MARK_PATH: &str = "/api/instruction/mark_attendance_qr";

/// 模拟门户的行为与计数
#[derive(Default)]
pub struct PortalState {
    /// (username, password) -> 登录 200 时的响应体
    pub accounts: HashMap<(String, String), Value>,
    /// 登录路径 -> 强制返回的状态码
    pub login_status_override: HashMap<String, u16>,
    /// token -> 签到状态码，未列出的 token 返回 401
    pub marks: HashMap<String, u16>,
    /// 签到处理耗时
    pub mark_delay_ms: u64,

    pub prime_hits: AtomicUsize,
    pub login_hits: AtomicUsize,
    pub mark_hits: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub login_paths: Mutex<Vec<String>>,
    pub login_bodies: Mutex<Vec<Value>>,
    pub mark_bodies: Mutex<Vec<Value>>,
    pub origins: Mutex<Vec<String>>,
    pub referers: Mutex<Vec<String>>,
    pub user_agents: Mutex<Vec<String>>,
    /// 预热请求携带的 (Origin, Referer)
    pub prime_headers: Mutex<Vec<(String, String)>>,
}

impl PortalState {
    pub fn with_account(mut self, user: &str, pass: &str, reply: Value) -> Self {
        self.accounts.insert((user.to_string(), pass.to_string()), reply);
        self
    }

    pub fn with_mark(mut self, token: &str, status: u16) -> Self {
        self.marks.insert(token.to_string(), status);
        self
    }

    pub fn with_login_status(mut self, path: &str, status: u16) -> Self {
        self.login_status_override.insert(path.to_string(), status);
        self
    }

    pub fn with_mark_delay(mut self, delay_ms: u64) -> Self {
        self.mark_delay_ms = delay_ms;
        self
    }

    fn record_headers(&self, headers: &HeaderMap) {
        let read = |name| read_header(headers, name);
        self.origins.lock().unwrap().push(read(header::ORIGIN));
        self.referers.lock().unwrap().push(read(header::REFERER));
        self.user_agents.lock().unwrap().push(read(header::USER_AGENT));
    }
}

/// 正在运行的模拟门户
pub struct MockPortal {
    pub base_url: String,
    pub state: Arc<PortalState>,
}

impl MockPortal {
    pub async fn start(state: PortalState) -> Self {
        let state = Arc::new(state);

        let app = Router::new()
            .route("/", get(prime))
            .route(LOGIN_PATH, post(login))
            .route(LOGIN_V2_PATH, post(login))
            .route(MARK_PATH, post(mark))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn login_hits(&self) -> usize {
        self.state.login_hits.load(Ordering::SeqCst)
    }

    pub fn mark_hits(&self) -> usize {
        self.state.mark_hits.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn login_paths(&self) -> Vec<String> {
        self.state.login_paths.lock().unwrap().clone()
    }

    pub fn origins(&self) -> Vec<String> {
        self.state.origins.lock().unwrap().clone()
    }

    pub fn prime_hits(&self) -> usize {
        self.state.prime_hits.load(Ordering::SeqCst)
    }

    pub fn prime_headers(&self) -> Vec<(String, String)> {
        self.state.prime_headers.lock().unwrap().clone()
    }
}

fn read_header(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn prime(
    State(state): State<Arc<PortalState>>,
    headers: HeaderMap,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    state.prime_hits.fetch_add(1, Ordering::SeqCst);
    state
        .prime_headers
        .lock()
        .unwrap()
        .push((read_header(&headers, header::ORIGIN), read_header(&headers, header::REFERER)));
    (StatusCode::OK, [(header::SET_COOKIE, "session=warm; Path=/")], "<html>portal</html>")
}

async fn login(
    State(state): State<Arc<PortalState>>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.login_hits.fetch_add(1, Ordering::SeqCst);
    state.login_paths.lock().unwrap().push(uri.path().to_string());
    state.login_bodies.lock().unwrap().push(body.clone());
    state.record_headers(&headers);

    if let Some(code) = state.login_status_override.get(uri.path()) {
        return (status(*code), Json(json!({"message": "service unavailable"})));
    }

    let user = body["username"].as_str().unwrap_or_default().to_string();
    let pass = body["password"].as_str().unwrap_or_default().to_string();

    match state.accounts.get(&(user, pass)) {
        Some(reply) => (StatusCode::OK, Json(reply.clone())),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"}))),
    }
}

async fn mark(State(state): State<Arc<PortalState>>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.mark_hits.fetch_add(1, Ordering::SeqCst);
    let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(now, Ordering::SeqCst);

    state.record_headers(&headers);
    state.mark_bodies.lock().unwrap().push(body);

    if state.mark_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.mark_delay_ms)).await;
    }

    let code = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.marks.get(token).copied())
        .unwrap_or(401);

    state.in_flight.fetch_sub(1, Ordering::SeqCst);

    let message = match code {
        200 => "Attendance marked".to_string(),
        404 => "Not Found".to_string(),
        other => format!("Rejected with {}", other),
    };
    (status(code), Json(json!({"message": message})))
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

/// 指向主站和备用站两个模拟门户的配置
pub fn config_for(primary: &MockPortal, alternate: &MockPortal) -> Config {
    let mut config = Config::for_hosts(&primary.base_url, &alternate.base_url);
    config.use_system_proxy = false;
    config.output_log_file = std::env::temp_dir()
        .join(format!("attendance_report_{}.txt", std::process::id()))
        .to_string_lossy()
        .to_string();
    config
}

/// 一个已经没有人监听的本地地址
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
