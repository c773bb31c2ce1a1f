use crate::error::{AppError, AppResult, FileError, InputError};
use crate::models::student::StudentRecord;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 名单文件结构
///
/// ```toml
/// [[squad]]
/// name = "A"
/// token = "..."
///
/// [[squad]]
/// name = "B"
/// user = "..."
/// pass = "..."
/// ```
#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    squad: Vec<StudentRecord>,
}

/// 从 TOML 文本解析名单
pub fn parse_roster(content: &str) -> Result<Vec<StudentRecord>, toml::de::Error> {
    let roster: RosterFile = toml::from_str(content)?;
    Ok(roster.squad)
}

/// 从 TOML 文件加载名单
pub async fn load_roster(roster_path: &Path) -> AppResult<Vec<StudentRecord>> {
    let path_str = roster_path.display().to_string();

    if !roster_path.exists() {
        return Err(AppError::File(FileError::NotFound { path: path_str }));
    }

    let content = fs::read_to_string(roster_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let squad = parse_roster(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;

    if squad.is_empty() {
        return Err(AppError::Input(InputError::EmptyRoster { path: path_str }));
    }

    tracing::info!("成功加载 {} 名学生", squad.len());

    Ok(squad)
}
