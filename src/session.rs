//! 作業セッション
//!
//! 現在のワークブック、保存先、直近のステータス、操作履歴をまとめて持つ。
//! 抽出・追記そのものは futian_common の純粋関数に任せる。

use crate::config::Config;
use crate::error::{FillerError, Result};
use crate::history::History;
use crate::preview::Preview;
use crate::store;
use futian_common::{
    append_record, create_blank_workbook, extract_person_info, load_workbook_from_bytes,
    save_workbook_to_buffer, AppendOutcome, FieldMap, Workbook,
};
use std::path::{Path, PathBuf};

/// 新規作成時のダウンロード名
pub const NEW_FILE_NAME: &str = "新团队统计表.xlsx";

/// 直近の操作結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub ok: bool,
    pub message: String,
}

/// submit の結果
#[derive(Debug, Clone)]
pub struct Submission {
    pub info: FieldMap,
    pub outcome: AppendOutcome,
}

#[derive(Debug, Clone)]
pub struct Session {
    workbook: Option<Workbook>,
    path: Option<PathBuf>,
    file_name: String,
    last_status: Option<Status>,
    history: History,
    dirty: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            workbook: None,
            path: None,
            file_name: config.new_file_name.clone(),
            last_status: None,
            history: History::with_limit(config.history_limit),
            dirty: false,
        }
    }

    /// メモリ上に新規テンプレートを用意
    pub fn create_blank(&mut self, file_name: Option<&str>) {
        self.workbook = Some(create_blank_workbook());
        self.path = None;
        self.file_name = file_name.unwrap_or(NEW_FILE_NAME).to_string();
        self.dirty = true;
    }

    /// ファイルを開く（以降の save はこのパスへ）
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let workbook = store::load_workbook(path)?;
        self.workbook = Some(workbook);
        self.path = Some(path.to_path_buf());
        self.file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone());
        self.dirty = false;
        Ok(())
    }

    /// アップロードされたバイト列を開く
    pub fn open_bytes(&mut self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let workbook = load_workbook_from_bytes(bytes)
            .map_err(|e| FillerError::WorkbookOpen(e.to_string()))?;
        self.workbook = Some(workbook);
        self.path = None;
        self.file_name = file_name.to_string();
        self.dirty = false;
        Ok(())
    }

    /// テキストを抽出して現在のワークブックへ追記
    ///
    /// 表頭がない場合はエラーではなく ok=false の結果を返す。
    pub fn submit(&mut self, text: &str) -> Result<Submission> {
        if text.trim().is_empty() {
            return Err(FillerError::EmptyInput);
        }
        let workbook = self.workbook.as_mut().ok_or(FillerError::NoWorkbook)?;

        let info = extract_person_info(text);
        let outcome = append_record(workbook, &info);

        if outcome.ok {
            self.history.record(&info, chrono::Local::now().time());
            self.dirty = true;
        } else {
            tracing::warn!(message = %outcome.message, "append rejected");
        }
        self.last_status = Some(Status {
            ok: outcome.ok,
            message: outcome.message.clone(),
        });

        Ok(Submission { info, outcome })
    }

    /// 開いたパスへ保存
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self.path.clone().ok_or_else(|| {
            FillerError::Config("尚未指定保存路径，请使用“另存为”".into())
        })?;
        self.save_as(&path)?;
        Ok(path)
    }

    /// 指定パスへ保存（以降の save もこのパス）
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        let workbook = self.workbook.as_ref().ok_or(FillerError::NoWorkbook)?;
        store::save_workbook(path, workbook)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// ダウンロード用のバイト列
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let workbook = self.workbook.as_ref().ok_or(FillerError::NoWorkbook)?;
        Ok(save_workbook_to_buffer(workbook)?)
    }

    pub fn preview(&self, last: usize) -> Option<Preview> {
        self.workbook
            .as_ref()
            .map(|wb| Preview::from_workbook(wb, last))
    }

    pub fn workbook(&self) -> Option<&Workbook> {
        self.workbook.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn last_status(&self) -> Option<&Status> {
        self.last_status.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// 未保存の変更があるか
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
