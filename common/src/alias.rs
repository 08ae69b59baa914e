//! ラベル表記ゆれの解決
//!
//! 入力テキストのラベル（「姓名」「手机」など）を正規フィールドへ対応付ける。
//! 逆引き表は初回参照時に一度だけ構築する。

use crate::types::Field;
use std::collections::HashMap;

/// 正規フィールドごとの受理ラベル
pub const FIELD_ALIASES: [(Field, &[&str]); 9] = [
    (Field::RealName, &["真实姓名", "姓名"]),
    (Field::Referrer, &["推荐人", "分享人"]),
    (Field::Residence, &["居住地", "地址"]),
    (Field::Occupation, &["职业"]),
    (Field::BirthDate, &["出身年月日", "出生年月日", "生日"]),
    (Field::Phone, &["电话号码", "手机号码", "电话", "手机"]),
    (Field::LifeSituation, &["现在生活事业家庭情况"]),
    (Field::Aspiration, &["想收获什么梦想"]),
    (Field::ReligiousBelief, &["有无宗教信仰"]),
];

lazy_static::lazy_static! {
    static ref REVERSE_ALIASES: HashMap<&'static str, Field> = FIELD_ALIASES
        .iter()
        .flat_map(|(field, names)| names.iter().map(move |name| (*name, *field)))
        .collect();
}

/// 整形済みラベルを正規フィールドへ解決（完全一致のみ）
pub fn resolve_label(label: &str) -> Option<Field> {
    REVERSE_ALIASES.get(label).copied()
}
