use std::fmt;

/// 应用程序错误类型
///
/// 只用于批处理之外的边界（配置、名单加载、报告写入），
/// 单个学生的失败一律落在 `Outcome` 里，不会变成 `AppError`
#[derive(Debug)]
pub enum AppError {
    /// 文件操作错误
    File(FileError),
    /// 输入错误
    Input(InputError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Input(e) => write!(f, "输入错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::File(e) => Some(e),
            AppError::Input(e) => Some(e),
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// 输入错误
#[derive(Debug)]
pub enum InputError {
    /// 二维码内容为空
    EmptyQrPayload,
    /// 名单为空
    EmptyRoster { path: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyQrPayload => write!(f, "二维码内容不能为空"),
            InputError::EmptyRoster { path } => write!(f, "名单为空: {}", path),
        }
    }
}

impl std::error::Error for InputError {}

/// 单次 HTTP 调用的错误
///
/// 在每个网络调用的边界被捕获并转换成 `Outcome`，不会越过单个学生的任务
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// 超时、连接失败等传输层错误
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// 请求头无法构造（例如 token 含非法字符）
    #[error("非法请求头 {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },
    /// 响应体不是合法 JSON
    #[error("响应体解析失败: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// 单个学生失败的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FailureKind {
    /// 既没有 token 也没有账号密码
    CredentialMissing,
    /// 所有登录地址都返回非 200
    LoginRejected,
    /// 登录返回 200 但没有可用 token
    TokenAbsent,
    /// 签到返回非 200（含备用地址）
    MarkingRejected,
    /// 超时、连接失败、响应无法解析
    TransportError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FailureKind::CredentialMissing => "CredentialMissing",
            FailureKind::LoginRejected => "LoginRejected",
            FailureKind::TokenAbsent => "TokenAbsent",
            FailureKind::MarkingRejected => "MarkingRejected",
            FailureKind::TransportError => "TransportError",
        };
        f.write_str(tag)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
