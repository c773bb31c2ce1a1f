//! 批量签到处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责整份名单的调度和统计。
//!
//! ## 核心功能
//!
//! 1. **加载名单**：读取 `Vec<StudentRecord>`
//! 2. **并发控制**：使用 Semaphore 限制同时处理的学生数
//! 3. **身份轮换**：按序号为每名学生分配 User-Agent
//! 4. **故障隔离**：单个学生的错误或 panic 只影响他自己的结果
//! 5. **全局统计**：汇总并输出报告
//!
//! ## 设计特点
//!
//! - **按完成顺序收集**：结果顺序不保证与名单一致
//! - **无中途取消**：启动后每名学生都会跑完，只有单个请求有超时
//! - **向下委托**：委托 `StudentFlow` 处理单个学生

use crate::config::Config;
use crate::models::{load_roster, Outcome, QrPayload, Step, StudentRecord};
use crate::utils::logging::{log_batch_start, log_startup, print_final_stats, truncate_text, write_report_file};
use crate::utils::report;
use crate::workflow::{StudentCtx, StudentFlow};
use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(config.max_concurrency);
        Self { config }
    }

    /// 运行应用主逻辑
    pub async fn run(&self, qr: &QrPayload) -> Result<Vec<Outcome>> {
        info!("\n📁 正在加载名单: {}", self.config.roster_file);
        let roster = load_roster(Path::new(&self.config.roster_file)).await?;

        log_batch_start(roster.len(), &truncate_text(qr.as_str(), 20));

        let outcomes = run_batch(&roster, qr, &self.config).await;

        // 输出报告
        let lines = report::render(&outcomes);
        for line in &lines {
            info!("{}", line);
        }
        if self.config.verbose_logging {
            info!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        write_report_file(&self.config.output_log_file, &lines)?;

        let summary = report::summarize(&outcomes);
        print_final_stats(summary.success, summary.failed, summary.total());
        info!("\n报告已保存至: {}", self.config.output_log_file);

        Ok(outcomes)
    }
}

/// 对整份名单执行签到
///
/// # 参数
/// - `roster`: 名单
/// - `qr`: 本批次的二维码（所有学生共用）
/// - `config`: 配置，`max_concurrency` 决定同时在途的学生数
///
/// # 返回
/// 每名学生恰好一个结果，按完成顺序排列
pub async fn run_batch(roster: &[StudentRecord], qr: &QrPayload, config: &Config) -> Vec<Outcome> {
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
    let flow = Arc::new(StudentFlow::new(config));
    let total = roster.len();

    let mut pending = FuturesUnordered::new();

    for (idx, student) in roster.iter().enumerate() {
        let student_index = idx + 1;
        let agent_index = config.agent_index(idx);
        let student = student.clone();
        let student_name = student.name.clone();
        let qr = qr.clone();
        let flow = flow.clone();
        let semaphore = semaphore.clone();

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let ctx = StudentCtx::new(student_index, agent_index, &student.name);
            flow.run(&student, &qr, &ctx).await
        });

        pending.push(async move { (student_index, student_name, handle.await) });
    }

    let mut outcomes = Vec::with_capacity(total);

    while let Some((student_index, student_name, joined)) = pending.next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("[学生 #{} {}] 任务执行失败: {}", student_index, student_name, e);
                aborted_outcome(student_name, e.to_string())
            }
        };

        info!(
            "[{}/{}] {} {}",
            outcomes.len() + 1,
            total,
            if outcome.success { "✅" } else { "❌" },
            outcome.student_name
        );
        outcomes.push(outcome);
    }

    outcomes
}

/// 任务 panic 或被取消时补一个结果，保证数量不变
fn aborted_outcome(student_name: String, reason: String) -> Outcome {
    Outcome {
        student_name,
        success: false,
        step: Step::Error,
        message: format!("task aborted: {}", reason),
        server_reply: None,
        http_status: None,
        kind: None,
    }
}
