//! # Squad Attendance
//!
//! 用一次扫描到的二维码，为整份名单批量完成考勤签到
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 每名学生独占的 HTTP 会话，按目标主机构造请求头
//!
//! ### ② 业务能力层（Services）
//! - `CredentialResolver` - token 直用 / 多地址顺序登录
//! - `AttendanceSubmitter` - 签到提交，404 时走备用地址
//! - `token_decoder` - 兼容多种登录响应结构
//!
//! ### ③ 流程层（Workflow）
//! - `StudentCtx` - 上下文封装（序号 + User-Agent + 计时）
//! - `StudentFlow` - 流程编排（resolve → submit）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 有界并发、故障隔离、结果汇总
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, Endpoint};
pub use error::{AppError, AppResult, FailureKind};
pub use models::{AuthResult, Outcome, QrPayload, Step, StudentRecord};
pub use orchestrator::{run_batch, App};
pub use workflow::{StudentCtx, StudentFlow};
