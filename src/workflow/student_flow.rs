//! 学生处理流程 - 流程层
//!
//! 核心职责：定义"一名学生"的完整处理流程
//!
//! 流程顺序：
//! 1. 创建独占会话
//! 2. 解析凭证（token / 登录）
//! 3. 提交签到（必要时走备用地址）
//!
//! 任何失败都转换成 `Outcome`，不向上抛出

use crate::clients::PortalClient;
use crate::config::Config;
use crate::error::FailureKind;
use crate::models::{AuthResult, Outcome, QrPayload, Step, StudentRecord};
use crate::services::{AttendanceSubmitter, CredentialResolver};
use crate::utils::logging::mask_token;
use crate::workflow::student_ctx::StudentCtx;
use tracing::{error, info, warn};

/// 学生处理流程
///
/// - 编排 Resolve → Submit
/// - 不持有任何跨学生的可变状态
/// - 只依赖业务能力（services）
pub struct StudentFlow {
    config: Config,
    resolver: CredentialResolver,
    submitter: AttendanceSubmitter,
}

impl StudentFlow {
    /// 创建新的学生处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            resolver: CredentialResolver::new(config),
            submitter: AttendanceSubmitter::new(config),
        }
    }

    pub async fn run(&self, student: &StudentRecord, qr: &QrPayload, ctx: &StudentCtx) -> Outcome {
        let client = match PortalClient::new(&self.config, ctx.agent_index) {
            Ok(client) => client,
            Err(e) => {
                error!("{} ❌ 无法创建会话: {}", ctx, e);
                return Outcome::failure(&student.name, Step::Error, FailureKind::TransportError, e.to_string());
            }
        };

        // ========== 1. 凭证 ==========
        let auth = self.resolver.resolve(student, &client).await;

        let Some(token) = auth.token.as_deref() else {
            warn!("{} 🔒 登录失败: {}", ctx, auth.method_label);
            return login_outcome(&student.name, &auth);
        };

        info!("{} 🔑 已获取 token ({}): {}", ctx, auth.method_label, mask_token(token));

        // ========== 2. 签到 ==========
        let outcome = self
            .submitter
            .submit(&student.name, token, qr, &client, ctx.started)
            .await;

        if outcome.success {
            info!("{} ✅ {}", ctx, outcome.message);
        } else {
            warn!("{} ❌ [{}] {}", ctx, outcome.step, outcome.message);
        }

        outcome
    }
}

/// 登录阶段失败时直接生成结果，不进入签到
fn login_outcome(student_name: &str, auth: &AuthResult) -> Outcome {
    let kind = auth.failure.unwrap_or(FailureKind::LoginRejected);
    Outcome::failure(student_name, Step::Login, kind, auth.method_label.clone()).with_reply(auth.http_status, auth.server_reply.clone())
}
