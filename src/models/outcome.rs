use crate::error::FailureKind;
use serde::Serialize;
use std::fmt;

/// 结果停在哪一步
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Step {
    Login,
    Marking,
    Fallback,
    Complete,
    Error,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Step::Login => "LOGIN",
            Step::Marking => "MARKING",
            Step::Fallback => "FALLBACK",
            Step::Complete => "COMPLETE",
            Step::Error => "ERROR",
        };
        f.write_str(tag)
    }
}

/// 单个学生的处理结果
///
/// 每名学生每次运行恰好产生一个，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub student_name: String,
    pub success: bool,
    pub step: Step,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
}

impl Outcome {
    pub fn success(
        student_name: impl Into<String>,
        step: Step,
        message: impl Into<String>,
        server_reply: Option<String>,
        http_status: Option<u16>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            success: true,
            step,
            message: message.into(),
            server_reply,
            http_status,
            kind: None,
        }
    }

    pub fn failure(
        student_name: impl Into<String>,
        step: Step,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            success: false,
            step,
            message: message.into(),
            server_reply: None,
            http_status: None,
            kind: Some(kind),
        }
    }

    pub fn with_reply(mut self, http_status: Option<u16>, server_reply: Option<String>) -> Self {
        self.http_status = http_status;
        self.server_reply = server_reply;
        self
    }
}
