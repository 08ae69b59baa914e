//! シートの見た目情報の読み込み
//!
//! calamine は値と数式しか返さないため、.xlsx パッケージ内の XML を直接読んで
//! アクティブシート・列幅・折り返し設定を取り出す。

use crate::error::{Error, Result};
use roxmltree::{Document, Node};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const STYLES_PART: &str = "xl/styles.xml";

/// Excel の最大桁幅（既定フォント）と余白（ピクセル）
const MAX_DIGIT_WIDTH: f64 = 7.0;
const CELL_PADDING: f64 = 5.0;

/// 1シート分の見た目情報
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetLayout {
    /// 列番号（1 始まり） → 文字数単位の幅
    pub column_widths: BTreeMap<u16, f64>,
    /// 折り返し表示のセル（行, 列）1 始まり
    pub wrapped_cells: BTreeSet<(u32, u16)>,
}

/// ワークブック全体の見た目情報
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookLayout {
    /// ブックに記録されたアクティブシートの位置
    pub active_sheet: usize,
    /// シート名 → 見た目情報
    pub sheets: HashMap<String, SheetLayout>,
}

impl WorkbookLayout {
    pub fn sheet(&self, name: &str) -> Option<&SheetLayout> {
        self.sheets.get(name)
    }
}

fn layout_error(part: &str, e: impl std::fmt::Display) -> Error {
    Error::WorkbookLoad(format!("{} を解析できません: {}", part, e))
}

/// パッケージのバイト列から見た目情報を読み込み
///
/// 該当パーツが無い場合は既定値（先頭シート・幅なし・折り返しなし）になる。
pub fn read_workbook_layout(bytes: &[u8]) -> Result<WorkbookLayout> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| layout_error("zip", e))?;

    let Some(workbook_xml) = read_part(&mut archive, WORKBOOK_PART)? else {
        return Ok(WorkbookLayout::default());
    };
    let workbook_doc = Document::parse(&workbook_xml).map_err(|e| layout_error(WORKBOOK_PART, e))?;

    let active_sheet = workbook_doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "workbookView")
        .and_then(|n| n.attribute("activeTab"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let targets = match read_part(&mut archive, WORKBOOK_RELS_PART)? {
        Some(xml) => relationship_targets(&xml)?,
        None => HashMap::new(),
    };
    let wrap_styles = match read_part(&mut archive, STYLES_PART)? {
        Some(xml) => wrapping_style_ids(&xml)?,
        None => BTreeSet::new(),
    };

    let mut sheets = HashMap::new();
    for node in workbook_doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "sheet")
    {
        let Some(name) = node.attribute("name") else {
            continue;
        };
        let Some(part) = relationship_id(node).and_then(|id| targets.get(id)) else {
            continue;
        };
        let Some(sheet_xml) = read_part(&mut archive, part)? else {
            continue;
        };
        sheets.insert(name.to_string(), sheet_layout(part, &sheet_xml, &wrap_styles)?);
    }

    tracing::debug!(active_sheet, sheets = sheets.len(), "workbook layout read");
    Ok(WorkbookLayout {
        active_sheet,
        sheets,
    })
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(layout_error(name, e)),
    };
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(Some(text))
}

/// `r:id` 属性（名前空間接頭辞は問わない）
fn relationship_id<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name() == "id")
        .map(|a| a.value())
}

/// リレーションシップ ID → パーツ名
fn relationship_targets(xml: &str) -> Result<HashMap<String, String>> {
    let doc = Document::parse(xml).map_err(|e| layout_error(WORKBOOK_RELS_PART, e))?;
    let targets = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Relationship")
        .filter_map(|n| {
            let id = n.attribute("Id")?;
            let target = n.attribute("Target")?;
            Some((id.to_string(), resolve_target(target)))
        })
        .collect();
    Ok(targets)
}

/// workbook.xml からの相対パスをパーツ名へ
fn resolve_target(target: &str) -> String {
    let target = target.replace('\\', "/");
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// 折り返しを持つ cellXfs の番号
fn wrapping_style_ids(xml: &str) -> Result<BTreeSet<usize>> {
    let doc = Document::parse(xml).map_err(|e| layout_error(STYLES_PART, e))?;
    let Some(cell_xfs) = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "cellXfs")
    else {
        return Ok(BTreeSet::new());
    };

    let ids = cell_xfs
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "xf")
        .enumerate()
        .filter(|(_, xf)| {
            xf.children()
                .filter(|n| n.is_element() && n.tag_name().name() == "alignment")
                .any(|a| matches!(a.attribute("wrapText"), Some("1" | "true")))
        })
        .map(|(idx, _)| idx)
        .collect();
    Ok(ids)
}

fn sheet_layout(part: &str, xml: &str, wrap_styles: &BTreeSet<usize>) -> Result<SheetLayout> {
    let doc = Document::parse(xml).map_err(|e| layout_error(part, e))?;
    let mut layout = SheetLayout::default();

    for col in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "col")
    {
        let range = (
            col.attribute("min").and_then(|v| v.parse::<u16>().ok()),
            col.attribute("max").and_then(|v| v.parse::<u16>().ok()),
            col.attribute("width").and_then(|v| v.parse::<f64>().ok()),
        );
        let (Some(min), Some(max), Some(width)) = range else {
            continue;
        };
        for idx in min..=max {
            layout.column_widths.insert(idx, character_width(width));
        }
    }

    if !wrap_styles.is_empty() {
        for cell in doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "c")
        {
            let style = cell.attribute("s").and_then(|v| v.parse::<usize>().ok());
            if !style.is_some_and(|s| wrap_styles.contains(&s)) {
                continue;
            }
            if let Some(position) = cell.attribute("r").and_then(parse_cell_ref) {
                layout.wrapped_cells.insert(position);
            }
        }
    }

    Ok(layout)
}

/// XML 上の幅（余白込み）を文字数単位へ戻す
///
/// 書き出し側は文字数に余白を足して保存するため、その逆変換を小数2桁で丸める。
fn character_width(stored: f64) -> f64 {
    let threshold = 1.0 + CELL_PADDING / MAX_DIGIT_WIDTH;
    let width = if stored >= threshold {
        (stored * MAX_DIGIT_WIDTH - CELL_PADDING) / MAX_DIGIT_WIDTH
    } else {
        stored / threshold
    };
    (width * 100.0).round() / 100.0
}

/// "B12" → (12, 2)
fn parse_cell_ref(reference: &str) -> Option<(u32, u16)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + (c as u32 - 'A' as u32 + 1);
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, u16::try_from(col).ok()?))
}
