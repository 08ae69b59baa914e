//! Excel読み込み
//!
//! calamine で .xlsx バイト列の全シートを読み、Workbook に変換する。
//! 数式は数式のまま保持し、列幅・折り返し・アクティブシートはパッケージの XML から復元する。

use crate::error::{Error, Result};
use crate::sheet_layout::{read_workbook_layout, SheetLayout};
use crate::template::apply_header_widths;
use crate::workbook::{CellValue, Sheet, Workbook};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;

/// バイト列からワークブックを読み込み
pub fn load_workbook_from_bytes(bytes: &[u8]) -> Result<Workbook> {
    let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| Error::WorkbookLoad(format!("ファイルを開けません: {}", e)))?;
    let layout = read_workbook_layout(bytes)?;

    let names = xlsx.sheet_names();
    if names.is_empty() {
        return Err(Error::WorkbookLoad("シートがありません".into()));
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in &names {
        let values = xlsx
            .worksheet_range(name)
            .map_err(|e| Error::WorkbookLoad(format!("シート '{}' を読めません: {}", name, e)))?;
        let formulas = xlsx
            .worksheet_formula(name)
            .map_err(|e| Error::WorkbookLoad(format!("シート '{}' の数式を読めません: {}", name, e)))?;
        sheets.push(read_sheet(name, &values, &formulas, layout.sheet(name))?);
    }

    let mut sheets = sheets.into_iter();
    let mut workbook = match sheets.next() {
        Some(first) => Workbook::from_sheet(first),
        None => return Err(Error::WorkbookLoad("シートがありません".into())),
    };
    for sheet in sheets {
        workbook.add_sheet(sheet);
    }
    if !workbook.set_active(layout.active_sheet) {
        tracing::warn!(active = layout.active_sheet, "active sheet out of range, using first sheet");
    }

    // 幅の記録が無いシートは表頭名から付け直す
    if workbook.active_sheet().column_widths().next().is_none() {
        apply_header_widths(&mut workbook);
    }

    tracing::debug!(
        sheets = workbook.sheets().len(),
        active = %workbook.sheet_name(),
        rows = workbook.max_row(),
        columns = workbook.max_column(),
        "workbook loaded"
    );
    Ok(workbook)
}

fn read_sheet(
    name: &str,
    values: &Range<Data>,
    formulas: &Range<String>,
    layout: Option<&SheetLayout>,
) -> Result<Sheet> {
    let mut sheet = Sheet::new(name);

    if let Some((start_row, start_col)) = values.start() {
        for (row_offset, col_offset, data) in values.cells() {
            let value = cell_value_from(data);
            if value.is_empty() {
                continue;
            }
            let (row, col) = position(start_row, start_col, row_offset, col_offset)?;
            sheet.set_value(row, col, value);
        }
    }

    if let Some((start_row, start_col)) = formulas.start() {
        for (row_offset, col_offset, formula) in formulas.cells() {
            if formula.is_empty() {
                continue;
            }
            let (row, col) = position(start_row, start_col, row_offset, col_offset)?;
            let cached = sheet.value(row, col).to_display_string();
            sheet.set_value(
                row,
                col,
                CellValue::Formula {
                    formula: formula.trim_start_matches('=').to_string(),
                    cached,
                },
            );
        }
    }

    if let Some(layout) = layout {
        for (col, width) in &layout.column_widths {
            sheet.set_column_width(*col, *width);
        }
        for (row, col) in &layout.wrapped_cells {
            sheet.set_wrap_text(*row, *col, true);
        }
    }

    Ok(sheet)
}

/// Range 内の相対位置 → 1 始まりの (行, 列)
fn position(start_row: u32, start_col: u32, row_offset: usize, col_offset: usize) -> Result<(u32, u16)> {
    let row = start_row as usize + row_offset + 1;
    let col = start_col as usize + col_offset + 1;
    let row = u32::try_from(row).map_err(|_| Error::WorkbookLoad(format!("行数が多すぎます: {}", row)))?;
    let col = u16::try_from(col).map_err(|_| Error::WorkbookLoad(format!("列数が多すぎます: {}", col)))?;
    Ok((row, col))
}

fn cell_value_from(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}
