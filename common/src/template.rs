//! 新規テンプレート

use crate::layout::{column_width_for, DEFAULT_HEADERS, DEFAULT_SHEET_NAME};
use crate::workbook::Workbook;

/// 標準表頭だけを持つ空のワークブックを作成
pub fn create_blank_workbook() -> Workbook {
    let mut workbook = Workbook::new(DEFAULT_SHEET_NAME);
    workbook.push_row(DEFAULT_HEADERS);
    apply_header_widths(&mut workbook);
    workbook
}

/// 1行目の表頭名から列幅を設定
///
/// 新規作成時と、列幅の記録が無いファイルを読み込んだときに使う。
pub fn apply_header_widths(workbook: &mut Workbook) {
    let widths: Vec<(u16, f64)> = workbook
        .row(1)
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.value.is_empty())
        .map(|(idx, cell)| {
            let header = cell.value.to_display_string();
            (idx as u16 + 1, column_width_for(&header))
        })
        .collect();

    for (col, width) in widths {
        workbook.set_column_width(col, width);
    }
}
