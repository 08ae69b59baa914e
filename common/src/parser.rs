//! 貼り付けテキストのパーサー
//!
//! 「ラベル：値」形式の行と、ラベルを持たない継続行が混在するテキストから
//! FieldMap を組み立てる。どんな入力でも失敗せず、最悪すべて空の結果を返す。

use crate::alias::resolve_label;
use crate::normalizer::normalize_birth_date;
use crate::types::{Field, FieldMap};

/// 全角コロン（区切りはこちらに統一してから分割する）
const FULL_WIDTH_COLON: char = '：';
const HALF_WIDTH_COLON: char = ':';

/// 継続行の追記先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// まだラベルを見ていない（ラベルなし行は捨てる）
    Idle,
    /// 直近のラベルのフィールドへ追記中
    Accumulating(Field),
}

/// 1行の分類結果
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// 既知ラベルの行（値は空のこともある）
    Labeled { field: Field, value: String },
    /// ラベルなし、または未知ラベル
    Plain(&'a str),
}

/// テキストから個人情報を抽出
///
/// # Examples
/// ```
/// use futian_common::{extract_person_info, Field};
///
/// let info = extract_person_info("姓名：张三\n电话：123\n备注继续");
/// assert_eq!(info.get(Field::RealName), "张三");
/// assert_eq!(info.get(Field::Phone), "123\n备注继续");
/// ```
pub fn extract_person_info(text: &str) -> FieldMap {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut result = FieldMap::new();
    let mut cursor = Cursor::Idle;

    for raw_line in text.split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let line = strip_list_prefix(line);

        cursor = match (classify_line(line), cursor) {
            (Line::Labeled { field, value }, _) => {
                if !value.is_empty() {
                    result.set(field, value);
                }
                Cursor::Accumulating(field)
            }
            (Line::Plain(content), Cursor::Accumulating(field)) => {
                result.append_line(field, content);
                cursor
            }
            (Line::Plain(_), Cursor::Idle) => Cursor::Idle,
        };
    }

    let birth_date = normalize_birth_date(result.get(Field::BirthDate));
    result.set(Field::BirthDate, birth_date);

    result
}

/// 行頭の番号（"1. " など）を除去
///
/// 数字・ピリオド・空白の連続をすべて落とす。行全体がそれだけなら空行になる。
fn strip_list_prefix(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
}

fn classify_line(line: &str) -> Line<'_> {
    if let Some((label, value)) = split_label(line) {
        if let Some(field) = resolve_label(&clean_label(&label)) {
            return Line::Labeled {
                field,
                value: value.trim().to_string(),
            };
        }
    }
    Line::Plain(line)
}

/// 最初のコロンでラベルと値に分割（半角コロンは全角に統一）
fn split_label(line: &str) -> Option<(String, String)> {
    if !line.contains([FULL_WIDTH_COLON, HALF_WIDTH_COLON]) {
        return None;
    }
    let normalized = line.replace(HALF_WIDTH_COLON, "：");
    normalized
        .split_once(FULL_WIDTH_COLON)
        .map(|(label, value)| (label.to_string(), value.to_string()))
}

/// ラベルの注記（括弧以降）と空白を除去
fn clean_label(label: &str) -> String {
    let head = label.split(['（', '(']).next().unwrap_or_default();
    head.trim().chars().filter(|c| !c.is_whitespace()).collect()
}
