use crate::error::{FillerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定ワークブックを上書きする環境変数
pub const WORKBOOK_ENV: &str = "FUTIAN_WORKBOOK";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_workbook: Option<PathBuf>,
    pub new_file_name: String,
    pub preview_rows: usize,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_workbook: None,
            new_file_name: "团队统计表.xlsx".into(),
            preview_rows: 3,
            history_limit: 50,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FillerError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("futian-filler").join("config.json"))
    }

    /// 対象ワークブックを決定（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_workbook(&self, arg: Option<PathBuf>) -> Option<PathBuf> {
        arg.or_else(|| {
            std::env::var_os(WORKBOOK_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| self.default_workbook.clone())
    }

    /// 対象ワークブック（どこにも指定がなければエラー）
    pub fn require_workbook(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        self.resolve_workbook(arg).ok_or(FillerError::NoWorkbook)
    }
}
