//! 抽出結果の型定義
//!
//! - Field: 9つの正規フィールド（表頭名と一致する）
//! - FieldMap: フィールド → 値（常に9キーすべてを保持）

use crate::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// 正規フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    RealName,
    Referrer,
    Residence,
    Occupation,
    BirthDate,
    Phone,
    LifeSituation,
    Aspiration,
    ReligiousBelief,
}

impl Field {
    /// 表頭の並び順と同じ
    pub const ALL: [Field; 9] = [
        Field::RealName,
        Field::Referrer,
        Field::Residence,
        Field::Occupation,
        Field::BirthDate,
        Field::Phone,
        Field::LifeSituation,
        Field::Aspiration,
        Field::ReligiousBelief,
    ];

    /// 正規名（Excel表頭と完全一致させる）
    pub fn label(self) -> &'static str {
        match self {
            Field::RealName => "真实姓名",
            Field::Referrer => "推荐人",
            Field::Residence => "居住地",
            Field::Occupation => "职业",
            Field::BirthDate => "出身年月日",
            Field::Phone => "电话号码",
            Field::LifeSituation => "现在生活事业家庭情况",
            Field::Aspiration => "想收获什么梦想",
            Field::ReligiousBelief => "有无宗教信仰",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 抽出結果
///
/// 値が空でもキーは常に存在する。JSON化すると正規順の
/// `{"真实姓名": "...", ...}` になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: [String; 9],
}

/// 名前が空のときに表示するプレースホルダ
pub const UNKNOWN_NAME: &str = "未知";

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// 継続行を追記（既に内容があれば改行で連結）
    pub fn append_line(&mut self, field: Field, line: &str) {
        let slot = &mut self.values[field.index()];
        if !slot.is_empty() {
            slot.push('\n');
        }
        slot.push_str(line);
    }

    /// 正規順に (フィールド, 値) を列挙
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// すべて空か
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_empty())
    }

    /// 表示用の名前（空なら「未知」）
    pub fn display_name(&self) -> &str {
        let name = self.get(Field::RealName);
        if name.is_empty() {
            UNKNOWN_NAME
        } else {
            name
        }
    }

    /// 正規順の JSON 文字列
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.label(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_has_all_fields_empty() {
        let map = FieldMap::new();
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 9);
        assert!(map.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_append_line_joins_with_newline() {
        let mut map = FieldMap::new();
        map.append_line(Field::Aspiration, "第一行");
        map.append_line(Field::Aspiration, "第二行");
        assert_eq!(map.get(Field::Aspiration), "第一行\n第二行");
    }

    #[test]
    fn test_display_name_placeholder() {
        let mut map = FieldMap::new();
        assert_eq!(map.display_name(), "未知");
        map.set(Field::RealName, "张三");
        assert_eq!(map.display_name(), "张三");
    }

    #[test]
    fn test_serialize_keeps_canonical_order() {
        let mut map = FieldMap::new();
        map.set(Field::Phone, "13800000000");
        let json = map.to_json(false).unwrap();

        assert!(json.starts_with("{\"真实姓名\":\"\""));
        let name_pos = json.find("真实姓名").unwrap();
        let phone_pos = json.find("电话号码").unwrap();
        let belief_pos = json.find("有无宗教信仰").unwrap();
        assert!(name_pos < phone_pos && phone_pos < belief_pos);
        assert!(json.contains("\"电话号码\":\"13800000000\""));
    }
}
