//! ワークブックファイルの読み書き
//!
//! デスクトップ版と同じく「開く → 追記 → 保存」を1回の操作で行う。

use crate::error::{FillerError, Result};
use futian_common::{
    append_record, create_blank_workbook, extract_person_info, load_workbook_from_bytes,
    save_workbook_to_buffer, FieldMap, Workbook,
};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// ファイルからワークブックを読み込み
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(FillerError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let workbook = load_workbook_from_bytes(&bytes)
        .map_err(|e| FillerError::WorkbookOpen(e.to_string()))?;
    tracing::info!(path = %path.display(), rows = workbook.max_row(), "workbook opened");
    Ok(workbook)
}

/// ワークブックをファイルへ保存
///
/// 同じディレクトリの一時ファイルへ書いてから置き換えるため、途中で失敗しても元ファイルは残る。
/// 権限エラー（Excel で開いたままのファイルなど）は SaveLocked にする。
pub fn save_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    let bytes = save_workbook_to_buffer(workbook)?;
    let locked = |e: std::io::Error| match e.kind() {
        ErrorKind::PermissionDenied => FillerError::SaveLocked(path.display().to_string()),
        _ => FillerError::Io(e),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(locked)?;
    staged.write_all(&bytes).map_err(locked)?;
    staged.as_file().sync_all().map_err(locked)?;
    staged.persist(path).map_err(|e| locked(e.error))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "workbook saved");
    Ok(())
}

/// 標準表頭の新規ファイルを作成
pub fn create_workbook_file(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(FillerError::FileExists(path.display().to_string()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save_workbook(path, &create_blank_workbook())
}

/// テキストを抽出してファイルへ追記
///
/// `output` を省略すると元ファイルを上書きする。
pub fn append_text_to_file(path: &Path, text: &str, output: Option<&Path>) -> Result<FieldMap> {
    let mut workbook = load_workbook(path)?;
    let info = extract_person_info(text);

    let outcome = append_record(&mut workbook, &info);
    if !outcome.ok {
        return Err(FillerError::AppendRejected(outcome.message));
    }

    save_workbook(output.unwrap_or(path), &workbook)?;
    Ok(info)
}
