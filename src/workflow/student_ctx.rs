//! 学生处理上下文
//!
//! 封装"我正在处理名单里的第几名学生"这一信息

use std::fmt::Display;
use std::time::Instant;

/// 学生处理上下文
#[derive(Debug, Clone)]
pub struct StudentCtx {
    /// 名单中的序号（从1开始，仅用于日志显示）
    pub student_index: usize,

    /// User-Agent 池中的位置
    pub agent_index: usize,

    /// 学生姓名
    pub name: String,

    /// 开始处理的时间
    pub started: Instant,
}

impl StudentCtx {
    /// 创建新的学生上下文，计时从此刻开始
    pub fn new(student_index: usize, agent_index: usize, name: impl Into<String>) -> Self {
        Self {
            student_index,
            agent_index,
            name: name.into(),
            started: Instant::now(),
        }
    }
}

impl Display for StudentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[学生 #{} {} UA#{}]", self.student_index, self.name, self.agent_index)
    }
}
