//! 签到提交服务 - 业务能力层
//!
//! 只负责"带着 token 提交二维码"，至多两次请求：主地址，以及主地址 404 时的备用地址

use crate::clients::{PortalClient, PortalResponse};
use crate::config::{Config, Endpoint};
use crate::error::{FailureKind, PortalError};
use crate::models::{Outcome, QrPayload, Step};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, warn};

/// 签到提交服务
///
/// 职责：
/// - 构造签到请求体（二维码 + 固定坐标）
/// - 仅在 HTTP 404 时换用备用地址，传输层错误不重试
/// - 把最终响应归类为 `Outcome`
pub struct AttendanceSubmitter {
    mark_endpoint: Endpoint,
    fallback_endpoint: Endpoint,
    latitude: String,
    longitude: String,
    pre_mark_delay: Duration,
}

impl AttendanceSubmitter {
    /// 创建新的签到提交服务
    pub fn new(config: &Config) -> Self {
        Self {
            mark_endpoint: config.mark_endpoint.clone(),
            fallback_endpoint: config.mark_fallback_endpoint.clone(),
            latitude: config.latitude.clone(),
            longitude: config.longitude.clone(),
            pre_mark_delay: Duration::from_millis(config.pre_mark_delay_ms),
        }
    }

    /// 提交签到
    ///
    /// # 参数
    /// - `student_name`: 学生姓名（写入结果）
    /// - `token`: 已解析的 token
    /// - `qr`: 本批次的二维码
    /// - `client`: 该学生独占的会话
    /// - `started`: 该学生开始处理的时间，用于计算耗时
    pub async fn submit(
        &self,
        student_name: &str,
        token: &str,
        qr: &QrPayload,
        client: &PortalClient,
        started: Instant,
    ) -> Outcome {
        sleep(self.pre_mark_delay).await;

        let payload = self.build_payload(qr);

        let primary = match client.post_json(&self.mark_endpoint, &payload, Some(token)).await {
            Ok(response) => response,
            Err(e) => return transport_outcome(student_name, e),
        };

        if primary.is_ok() {
            return marked_outcome(student_name, Step::Complete, &primary, started);
        }

        if primary.status != 404 {
            return rejected_outcome(student_name, &primary);
        }

        info!("[{}] 签到地址返回 404，尝试备用地址 {}", student_name, self.fallback_endpoint.url());

        let fallback = match client.post_json(&self.fallback_endpoint, &payload, Some(token)).await {
            Ok(response) => response,
            Err(e) => return transport_outcome(student_name, e),
        };

        if fallback.is_ok() {
            marked_outcome(student_name, Step::Fallback, &fallback, started)
        } else {
            rejected_outcome(student_name, &fallback)
        }
    }

    /// 构建签到请求体
    fn build_payload(&self, qr: &QrPayload) -> Value {
        json!({
            "qr_code": qr.as_str(),
            "latitude": self.latitude,
            "longitude": self.longitude
        })
    }
}

fn marked_outcome(student_name: &str, step: Step, response: &PortalResponse, started: Instant) -> Outcome {
    let elapsed = started.elapsed().as_secs_f64();
    let message = match step {
        Step::Fallback => format!("MARKED via fallback in {:.2}s", elapsed),
        _ => format!("MARKED in {:.2}s", elapsed),
    };
    Outcome::success(student_name, step, message, response.reply_text(), Some(response.status))
}

fn rejected_outcome(student_name: &str, response: &PortalResponse) -> Outcome {
    let reply = response.reply_text();
    let message = match &reply {
        Some(text) => format!("Failed ({}): {}", response.status, text),
        None => format!("Failed ({})", response.status),
    };
    warn!("[{}] 签到被拒绝: {}", student_name, message);
    Outcome::failure(student_name, Step::Marking, FailureKind::MarkingRejected, message)
        .with_reply(Some(response.status), reply)
}

fn transport_outcome(student_name: &str, error: PortalError) -> Outcome {
    warn!("[{}] 签到请求异常: {}", student_name, error);
    Outcome::failure(student_name, Step::Error, FailureKind::TransportError, error.to_string())
}
