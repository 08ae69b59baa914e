//! ファイル追記フローの統合テスト
//!
//! 新規作成 → 追記 → 再読み込みで内容を確認する

use futian_common::{CellValue, Field, DEFAULT_HEADERS};
use futian_filler::error::FillerError;
use futian_filler::store;
use tempfile::tempdir;

const SAMPLE: &str = "\
1. 姓名：张三
2. 分享人：李四
3. 地址：广州市天河区
4. 职业：会计
5. 生日：1990年5月3日
6. 手机：13800000000
7. 现在生活事业家庭情况：
已婚，育有一女
工作压力大
8. 想收获什么梦想：家庭幸福
9. 有无宗教信仰：无";

fn header_texts(path: &std::path::Path) -> Vec<String> {
    let workbook = store::load_workbook(path).expect("読み込み失敗");
    workbook
        .row(1)
        .iter()
        .map(|c| c.value.to_display_string())
        .collect()
}

#[test]
fn test_new_file_has_standard_headers() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("团队统计表.xlsx");

    store::create_workbook_file(&path, false).expect("新規作成失敗");

    assert!(path.exists());
    assert_eq!(header_texts(&path), DEFAULT_HEADERS);
}

#[test]
fn test_append_twice_then_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("名单.xlsx");
    store::create_workbook_file(&path, false).unwrap();

    let info = store::append_text_to_file(&path, SAMPLE, None).expect("追記失敗");
    assert_eq!(info.get(Field::RealName), "张三");
    assert_eq!(info.get(Field::BirthDate), "1990-05-03");

    store::append_text_to_file(&path, "姓名：王五\n电话：139", None).expect("追記失敗");

    let workbook = store::load_workbook(&path).unwrap();
    assert_eq!(workbook.record_count(), 2);

    // 序号
    assert_eq!(workbook.value(2, 3), &CellValue::Number(1.0));
    assert_eq!(workbook.value(3, 3), &CellValue::Number(2.0));
    // 1件目は残っている
    assert_eq!(workbook.value(2, 4), &CellValue::Text("张三".into()));
    assert_eq!(workbook.value(2, 5), &CellValue::Text("李四".into()));
    assert_eq!(workbook.value(2, 8), &CellValue::Text("1990-05-03".into()));
    assert_eq!(
        workbook.value(2, 10),
        &CellValue::Text("已婚，育有一女\n工作压力大".into())
    );
    assert_eq!(workbook.value(3, 4), &CellValue::Text("王五".into()));
    assert_eq!(workbook.value(3, 9), &CellValue::Text("139".into()));
    // 团队・福田数量は空のまま
    assert!(workbook.value(2, 1).is_empty());
    assert!(workbook.value(3, 2).is_empty());
}

#[test]
fn test_append_to_output_keeps_source() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("source.xlsx");
    let output = dir.path().join("output.xlsx");
    store::create_workbook_file(&source, false).unwrap();

    store::append_text_to_file(&source, SAMPLE, Some(&output)).unwrap();

    assert_eq!(store::load_workbook(&source).unwrap().record_count(), 0);
    assert_eq!(store::load_workbook(&output).unwrap().record_count(), 1);
}

#[test]
fn test_append_to_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = store::append_text_to_file(&dir.path().join("none.xlsx"), SAMPLE, None).unwrap_err();

    assert!(matches!(err, FillerError::FileNotFound(_)));
    assert!(err.to_string().contains("找不到文件"));
}

#[test]
fn test_append_to_headerless_file_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.xlsx");
    let bytes = futian_common::save_workbook_to_buffer(&futian_common::Workbook::new("Sheet1")).unwrap();
    std::fs::write(&path, bytes).unwrap();

    let err = store::append_text_to_file(&path, SAMPLE, None).unwrap_err();
    assert!(matches!(err, FillerError::AppendRejected(_)));
    assert!(err.to_string().contains("表格没有表头"));

    // 何も書き込まれていない
    assert_eq!(store::load_workbook(&path).unwrap().record_count(), 0);
}

#[test]
fn test_custom_header_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("custom.xlsx");

    let mut workbook = futian_common::Workbook::new("登记");
    workbook.push_row(["电话号码", "序号", "真实姓名", "备注"]);
    workbook.set_value(2, 4, "老会员");
    store::save_workbook(&path, &workbook).unwrap();

    store::append_text_to_file(&path, "姓名：赵六\n手机：137", None).unwrap();

    let reloaded = store::load_workbook(&path).unwrap();
    assert_eq!(reloaded.sheet_name(), "登记");
    assert_eq!(reloaded.value(2, 4), &CellValue::Text("老会员".into()));
    assert_eq!(reloaded.value(3, 1), &CellValue::Text("137".into()));
    assert_eq!(reloaded.value(3, 2), &CellValue::Number(2.0));
    assert_eq!(reloaded.value(3, 3), &CellValue::Text("赵六".into()));
    assert!(reloaded.value(3, 4).is_empty());
}

#[test]
fn test_append_keeps_other_sheets_and_formulas() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("团队统计表.xlsx");

    // 集計シート＋アクティブな名簿シート
    let mut workbook = futian_common::Workbook::new("汇总");
    workbook.set_value(1, 1, "总人数");
    workbook.set_value(
        1,
        2,
        CellValue::Formula {
            formula: "COUNTA(名单!D:D)-1".into(),
            cached: "1".into(),
        },
    );
    let roster = workbook.add_sheet(futian_common::Sheet::new("名单"));
    workbook.set_active(roster);
    workbook.push_row(DEFAULT_HEADERS);
    workbook.set_value(2, 3, 1u32);
    workbook.set_value(2, 4, "张三");
    workbook.set_wrap_text(2, 4, true);
    store::save_workbook(&path, &workbook).unwrap();

    store::append_text_to_file(&path, "姓名：李四", None).unwrap();

    let reloaded = store::load_workbook(&path).unwrap();
    let names: Vec<&str> = reloaded.sheets().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["汇总", "名单"]);
    assert_eq!(reloaded.sheet_name(), "名单");
    assert_eq!(reloaded.value(3, 4), &CellValue::Text("李四".into()));
    assert_eq!(reloaded.value(3, 3), &CellValue::Number(2.0));
    assert!(reloaded.cell(2, 4).unwrap().wrap_text);

    let summary = &reloaded.sheets()[0];
    assert!(matches!(
        summary.value(1, 2),
        CellValue::Formula { formula, .. } if formula.starts_with("COUNTA")
    ));
}
