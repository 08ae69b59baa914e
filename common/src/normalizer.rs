//! 値の正規化

use regex::Regex;

/// 生年月日を `YYYY-MM-DD` に統一
///
/// 数字の連続を3つ以上含む場合のみ、先頭3つを年・月・日として組み立てる。
/// それ以外は入力をそのまま返す。
pub fn normalize_birth_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    lazy_static::lazy_static! {
        static ref DIGITS_RE: Regex = Regex::new(r"\d+").unwrap();
    }

    let nums: Vec<&str> = DIGITS_RE
        .find_iter(value)
        .map(|m| m.as_str())
        .take(3)
        .collect();

    match nums.as_slice() {
        [year, month, day] => format!("{}-{:0>2}-{:0>2}", year, month, day),
        _ => value.to_string(),
    }
}
