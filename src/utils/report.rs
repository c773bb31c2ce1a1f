//! 结果报告
//!
//! 只是 `Outcome` 的投影，不包含任何额外逻辑

use crate::models::Outcome;

/// 成功 / 失败计数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub success: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// 渲染单条结果
pub fn render_line(outcome: &Outcome) -> String {
    let mut line = if outcome.success {
        format!("✅ {}: {}", outcome.student_name, outcome.message)
    } else {
        format!("❌ {} [{}]: {}", outcome.student_name, outcome.step, outcome.message)
    };

    if let Some(reply) = &outcome.server_reply {
        line.push_str("\n    ↳ ");
        line.push_str(reply);
    }

    line
}

/// 渲染全部结果
pub fn render(outcomes: &[Outcome]) -> Vec<String> {
    outcomes.iter().map(render_line).collect()
}

pub fn summarize(outcomes: &[Outcome]) -> Summary {
    outcomes.iter().fold(Summary::default(), |mut acc, o| {
        if o.success {
            acc.success += 1;
        } else {
            acc.failed += 1;
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::models::Step;

    #[test]
    fn test_render_success_and_failure() {
        let ok = Outcome::success("A", Step::Complete, "MARKED in 0.42s", Some("Attendance marked".into()), Some(200));
        let bad = Outcome::failure("B", Step::Login, FailureKind::LoginRejected, "Login Failed (401)");

        assert_eq!(render_line(&ok), "✅ A: MARKED in 0.42s\n    ↳ Attendance marked");
        assert_eq!(render_line(&bad), "❌ B [LOGIN]: Login Failed (401)");

        let summary = summarize(&[ok, bad]);
        assert_eq!(summary, Summary { success: 1, failed: 1 });
        assert_eq!(summary.total(), 2);
    }
}
