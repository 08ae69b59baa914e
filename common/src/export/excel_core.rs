//! Excel書き出し（共通ライブラリ）
//!
//! メモリ上の Workbook を rust_xlsxwriter で .xlsx バイト列へ変換する。

use crate::error::{Error, Result};
use crate::workbook::{CellValue, Sheet, Workbook};
use rust_xlsxwriter::{Format, Formula, Workbook as XlsxWorkbook, Worksheet, XlsxError};

const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

fn write_error(context: &str, e: XlsxError) -> Error {
    Error::WorkbookWrite(format!("{}: {}", context, e))
}

/// ワークブックをバッファに書き出し
///
/// 全シートをもとの順で書き、アクティブシートを引き継ぐ。
pub fn save_workbook_to_buffer(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut xlsx = XlsxWorkbook::new();
    let formats = CellFormats::new();

    for (idx, sheet) in workbook.sheets().iter().enumerate() {
        let worksheet = xlsx.add_worksheet();
        write_sheet(worksheet, sheet, &formats)?;
        if idx == workbook.active_index() {
            worksheet.set_active(true);
        }
    }

    let buffer = xlsx
        .save_to_buffer()
        .map_err(|e| write_error("Excel保存エラー", e))?;
    tracing::debug!(
        bytes = buffer.len(),
        sheets = workbook.sheets().len(),
        rows = workbook.max_row(),
        "workbook serialized"
    );
    Ok(buffer)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, formats: &CellFormats) -> Result<()> {
    worksheet
        .set_name(sheet.name())
        .map_err(|e| write_error("シート名設定エラー", e))?;

    for (col, width) in sheet.column_widths() {
        worksheet
            .set_column_width(col - 1, width)
            .map_err(|e| write_error("列幅設定エラー", e))?;
    }

    for (row_idx, cells) in sheet.rows().iter().enumerate() {
        for (col_idx, cell) in cells.iter().enumerate() {
            write_cell(
                worksheet,
                row_idx as u32,
                col_idx as u16,
                &cell.value,
                cell.wrap_text,
                formats,
            )?;
        }
    }
    Ok(())
}

struct CellFormats {
    wrap: Format,
    date: Format,
    wrapped_date: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            wrap: Format::new().set_text_wrap(),
            date: Format::new().set_num_format(DATE_NUM_FORMAT),
            wrapped_date: Format::new().set_num_format(DATE_NUM_FORMAT).set_text_wrap(),
        }
    }
}

/// 1セル書き込み（row/col は 0 始まり）
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    wrap: bool,
    formats: &CellFormats,
) -> Result<()> {
    let result = match (value, wrap) {
        (CellValue::Empty, false) => return Ok(()),
        (CellValue::Empty, true) => worksheet.write_blank(row, col, &formats.wrap),
        (CellValue::Text(s), false) => worksheet.write_string(row, col, s),
        (CellValue::Text(s), true) => worksheet.write_string_with_format(row, col, s, &formats.wrap),
        (CellValue::Number(n), false) => worksheet.write_number(row, col, *n),
        (CellValue::Number(n), true) => {
            worksheet.write_number_with_format(row, col, *n, &formats.wrap)
        }
        (CellValue::Bool(b), false) => worksheet.write_boolean(row, col, *b),
        (CellValue::Bool(b), true) => {
            worksheet.write_boolean_with_format(row, col, *b, &formats.wrap)
        }
        (CellValue::DateTime(n), false) => {
            worksheet.write_number_with_format(row, col, *n, &formats.date)
        }
        (CellValue::DateTime(n), true) => {
            worksheet.write_number_with_format(row, col, *n, &formats.wrapped_date)
        }
        (CellValue::Formula { formula, cached }, false) => {
            worksheet.write_formula(row, col, Formula::new(formula).set_result(cached))
        }
        (CellValue::Formula { formula, cached }, true) => worksheet.write_formula_with_format(
            row,
            col,
            Formula::new(formula).set_result(cached),
            &formats.wrap,
        ),
    };
    result
        .map(|_| ())
        .map_err(|e| write_error("セル書き込みエラー", e))
}
