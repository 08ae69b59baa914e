//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use futian_filler::error::FillerError;

/// FillerErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        FillerError::Config("测试".to_string()),
        FillerError::FileNotFound("a.xlsx".to_string()),
        FillerError::FileExists("a.xlsx".to_string()),
        FillerError::WorkbookOpen("broken".to_string()),
        FillerError::SaveLocked("a.xlsx".to_string()),
        FillerError::NoWorkbook,
        FillerError::EmptyInput,
        FillerError::AppendRejected("表格没有表头，无法识别列名".to_string()),
        FillerError::Prompt("not a terminal".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 保存失敗のメッセージ確認
#[test]
fn test_save_locked_message() {
    let err = FillerError::SaveLocked("团队统计表.xlsx".to_string());
    let display = format!("{}", err);

    assert!(display.contains("请先关闭该 Excel 文件"));
    assert!(display.contains("团队统计表.xlsx"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FillerError = io_err.into();

    assert!(matches!(err, FillerError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: FillerError = json_err.into();

    assert!(matches!(err, FillerError::JsonParse(_)));
}

/// common::Errorからの変換（透過的）
#[test]
fn test_common_error_conversion() {
    let common_err = futian_common::Error::WorkbookLoad("シートがありません".to_string());
    let err: FillerError = common_err.into();

    assert!(matches!(err, FillerError::Common(_)));
    assert!(format!("{}", err).contains("シートがありません"));
}
