//! メモリ上のワークブック
//!
//! 複数シートを保持し、読み書きの対象はアクティブシート。行・列は Excel と同じく 1 始まり。
//! 読み込み（import）と書き出し（export）はこの型を介して行う。

use std::collections::BTreeMap;

/// セルの値
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel シリアル値
    DateTime(f64),
    /// 数式（先頭の `=` なし）と最後に計算された値
    Formula { formula: String, cached: String },
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 表示用文字列（整数値の数値は小数点なし）
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) | CellValue::DateTime(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            CellValue::Formula { formula, cached } => {
                if cached.is_empty() {
                    format!("={}", formula)
                } else {
                    cached.clone()
                }
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

/// セル（値＋折り返し表示）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub wrap_text: bool,
}

/// 1シート
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    /// rows[0] が1行目
    rows: Vec<Vec<Cell>>,
    column_widths: BTreeMap<u16, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 最終行番号
    ///
    /// 一度でも書き込んだ行は値が空でも数える。空シートは 1。
    pub fn max_row(&self) -> u32 {
        (self.rows.len() as u32).max(1)
    }

    /// 最終列番号（空シートは 0）
    pub fn max_column(&self) -> u16 {
        self.rows.iter().map(|r| r.len() as u16).max().unwrap_or(0)
    }

    /// データ行数（1行目の表頭を除く）
    pub fn record_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1))
    }

    /// セル値（未作成セルは Empty）
    pub fn value(&self, row: u32, col: u16) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.cell(row, col).map(|c| &c.value).unwrap_or(EMPTY)
    }

    /// 行のセル一覧（範囲外は空スライス）
    pub fn row(&self, row: u32) -> &[Cell] {
        if row == 0 {
            return &[];
        }
        self.rows.get(row as usize - 1).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 全行（1行目から）
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn set_value(&mut self, row: u32, col: u16, value: impl Into<CellValue>) {
        self.cell_mut(row, col).value = value.into();
    }

    pub fn set_wrap_text(&mut self, row: u32, col: u16, wrap: bool) {
        self.cell_mut(row, col).wrap_text = wrap;
    }

    /// 行末に1行追加（表頭作成用）
    pub fn push_row<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let row = values
            .into_iter()
            .map(|v| Cell {
                value: v.into(),
                wrap_text: false,
            })
            .collect();
        self.rows.push(row);
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        if col > 0 {
            self.column_widths.insert(col, width);
        }
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// (列番号, 幅) を列順に列挙
    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }

    fn cell_mut(&mut self, row: u32, col: u16) -> &mut Cell {
        let (r, c) = (row.max(1) as usize - 1, col.max(1) as usize - 1);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        if cells.len() <= c {
            cells.resize_with(c + 1, Cell::default);
        }
        &mut cells[c]
    }
}

/// ワークブック
///
/// 常に1枚以上のシートを持つ。セル操作はすべてアクティブシートに対して行う。
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    active: usize,
}

impl Workbook {
    /// シート1枚のワークブック
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self::from_sheet(Sheet::new(sheet_name))
    }

    pub fn from_sheet(sheet: Sheet) -> Self {
        Self {
            sheets: vec![sheet],
            active: 0,
        }
    }

    /// シートを末尾に追加し、その位置を返す
    pub fn add_sheet(&mut self, sheet: Sheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len() - 1
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// アクティブシートを切り替え（範囲外は無視して false）
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.sheets.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active_sheet(&self) -> &Sheet {
        &self.sheets[self.active]
    }

    pub fn active_sheet_mut(&mut self) -> &mut Sheet {
        &mut self.sheets[self.active]
    }

    pub fn sheet_name(&self) -> &str {
        self.active_sheet().name()
    }

    pub fn max_row(&self) -> u32 {
        self.active_sheet().max_row()
    }

    pub fn max_column(&self) -> u16 {
        self.active_sheet().max_column()
    }

    pub fn record_count(&self) -> usize {
        self.active_sheet().record_count()
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.active_sheet().cell(row, col)
    }

    pub fn value(&self, row: u32, col: u16) -> &CellValue {
        self.active_sheet().value(row, col)
    }

    pub fn row(&self, row: u32) -> &[Cell] {
        self.active_sheet().row(row)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        self.active_sheet().rows()
    }

    pub fn set_value(&mut self, row: u32, col: u16, value: impl Into<CellValue>) {
        self.active_sheet_mut().set_value(row, col, value);
    }

    pub fn set_wrap_text(&mut self, row: u32, col: u16, wrap: bool) {
        self.active_sheet_mut().set_wrap_text(row, col, wrap);
    }

    pub fn push_row<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.active_sheet_mut().push_row(values);
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.active_sheet_mut().set_column_width(col, width);
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.active_sheet().column_width(col)
    }
}
