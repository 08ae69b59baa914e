//! ワークブックへの1行追記
//!
//! 表頭→列の対応は毎回1行目から作り直す。列の並びや過不足には依存しない。

use crate::layout::SEQUENCE_HEADER;
use crate::types::FieldMap;
use crate::workbook::Workbook;
use std::collections::HashMap;

/// 表頭がないときのメッセージ
pub const NO_HEADER_MESSAGE: &str = "表格没有表头，无法识别列名";

/// 追記結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub ok: bool,
    pub message: String,
    /// 書き込んだ行番号（失敗時は None）
    pub row: Option<u32>,
    /// 序号列に書いた値（序号列がなければ None）
    pub sequence: Option<u32>,
}

impl AppendOutcome {
    fn rejected(message: &str) -> Self {
        Self {
            ok: false,
            message: message.to_string(),
            row: None,
            sequence: None,
        }
    }
}

/// 1行目から 表頭名 → 列番号 の対応を作成
///
/// 前後の空白は除去し、空のセルは無視する。同名の表頭は右側が優先。
pub fn header_map(workbook: &Workbook) -> HashMap<String, u16> {
    workbook
        .row(1)
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| {
            let name = cell.value.to_display_string().trim().to_string();
            (!name.is_empty()).then(|| (name, idx as u16 + 1))
        })
        .collect()
}

/// 抽出結果を最終行の次に追記
///
/// 表頭に一致するフィールドだけを書き込み（折り返し表示を付与）、
/// 「序号」列があれば 行番号−1 を入れる。表頭がなければ何も変更せず ok=false を返す。
pub fn append_record(workbook: &mut Workbook, info: &FieldMap) -> AppendOutcome {
    let headers = header_map(workbook);
    if headers.is_empty() {
        tracing::warn!("append rejected: no header cells in row 1");
        return AppendOutcome::rejected(NO_HEADER_MESSAGE);
    }

    let next_row = workbook.max_row() + 1;
    tracing::debug!(row = next_row, columns = headers.len(), "appending record");

    for (field, value) in info.iter() {
        if let Some(&col) = headers.get(field.label()) {
            workbook.set_value(next_row, col, value);
            workbook.set_wrap_text(next_row, col, true);
        }
    }

    let sequence = headers.get(SEQUENCE_HEADER).map(|&col| {
        let seq = next_row - 1;
        workbook.set_value(next_row, col, seq);
        seq
    });

    AppendOutcome {
        ok: true,
        message: format!("成功添加：{}", info.display_name()),
        row: Some(next_row),
        sequence,
    }
}
