//! セッションの統合テスト
//!
//! 新規作成・アップロード・追記・履歴・保存を検証

use futian_common::{CellValue, Field};
use futian_filler::config::Config;
use futian_filler::error::FillerError;
use futian_filler::session::{Session, NEW_FILE_NAME};
use futian_filler::store;
use tempfile::tempdir;

#[test]
fn test_submit_without_workbook() {
    let mut session = Session::default();
    let err = session.submit("姓名：张三").unwrap_err();
    assert!(matches!(err, FillerError::NoWorkbook));
    assert!(session.last_status().is_none());
}

#[test]
fn test_submit_empty_text() {
    let mut session = Session::default();
    session.create_blank(None);

    let err = session.submit("  \n\t").unwrap_err();
    assert!(matches!(err, FillerError::EmptyInput));
    assert!(session.history().is_empty());
}

#[test]
fn test_blank_session_submit_and_history() {
    let mut session = Session::default();
    session.create_blank(None);
    assert_eq!(session.file_name(), NEW_FILE_NAME);

    let first = session.submit("姓名：张三\n职业：老师").unwrap();
    assert!(first.outcome.ok);
    assert_eq!(first.outcome.message, "成功添加：张三");
    assert_eq!(first.info.get(Field::Occupation), "老师");

    session.submit("姓名：李四\n电话：138").unwrap();

    let workbook = session.workbook().unwrap();
    assert_eq!(workbook.record_count(), 2);
    assert_eq!(workbook.value(3, 3), &CellValue::Number(2.0));

    let names: Vec<&str> = session.history().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["李四", "张三"]);
    let latest = session.history().iter().next().unwrap();
    assert_eq!(latest.phone, "138");
    assert_eq!(latest.occupation, "-");

    let status = session.last_status().unwrap();
    assert!(status.ok);
    assert_eq!(status.message, "成功添加：李四");
    assert!(session.is_dirty());

    session.clear_history();
    assert!(session.history().is_empty());
}

#[test]
fn test_headerless_upload_reports_failure() {
    let bytes = futian_common::save_workbook_to_buffer(&futian_common::Workbook::new("Sheet1")).unwrap();
    let mut session = Session::default();
    session.open_bytes("空表.xlsx", &bytes).unwrap();

    let submission = session.submit("姓名：张三").unwrap();
    assert!(!submission.outcome.ok);

    let status = session.last_status().unwrap();
    assert!(!status.ok);
    assert!(status.message.contains("表头"));
    assert!(session.history().is_empty());
    assert_eq!(session.workbook().unwrap().max_row(), 1);
}

#[test]
fn test_open_bytes_rejects_garbage() {
    let mut session = Session::default();
    let err = session.open_bytes("x.xlsx", b"garbage").unwrap_err();
    assert!(matches!(err, FillerError::WorkbookOpen(_)));
    assert!(session.workbook().is_none());
}

#[test]
fn test_export_bytes_roundtrip() {
    let mut session = Session::default();
    session.create_blank(Some("下载.xlsx"));
    session.submit("真实姓名：张三").unwrap();

    let bytes = session.to_bytes().unwrap();

    let mut reopened = Session::default();
    reopened.open_bytes("下载.xlsx", &bytes).unwrap();
    let preview = reopened.preview(3).unwrap();
    assert_eq!(preview.total_records, 1);
    assert_eq!(preview.rows[0][3], "张三");
}

#[test]
fn test_open_path_and_save() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("名单.xlsx");
    store::create_workbook_file(&path, false).unwrap();

    let mut session = Session::new(&Config::default());
    session.open_path(&path).unwrap();
    assert_eq!(session.file_name(), "名单.xlsx");
    assert!(!session.is_dirty());

    session.submit("姓名：张三").unwrap();
    let saved = session.save().unwrap();
    assert_eq!(saved, path);
    assert!(!session.is_dirty());

    assert_eq!(store::load_workbook(&path).unwrap().record_count(), 1);
}

#[test]
fn test_save_without_path_needs_save_as() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = Session::default();
    session.create_blank(None);

    assert!(session.save().is_err());

    let target = dir.path().join("新表.xlsx");
    session.save_as(&target).unwrap();
    assert_eq!(session.path(), Some(target.as_path()));
    assert!(target.exists());
}

#[test]
fn test_history_limit_from_config() {
    let config = Config {
        history_limit: 1,
        ..Default::default()
    };
    let mut session = Session::new(&config);
    session.create_blank(None);
    session.submit("姓名：甲").unwrap();
    session.submit("姓名：乙").unwrap();

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().iter().next().unwrap().name, "乙");
}
