//! 表頭と列幅の定義
//!
//! 新規テンプレートの表頭順と、列ごとの表示幅（見た目のみ）。

/// 团队（抽出対象外、手入力）
pub const TEAM_HEADER: &str = "团队";
/// 福田数量（抽出対象外、手入力）
pub const COUNT_HEADER: &str = "福田数量";
/// 序号（行位置から自動計算）
pub const SEQUENCE_HEADER: &str = "序号";

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// 新規テンプレートの表頭（この順で1行目に並べる）
pub const DEFAULT_HEADERS: [&str; 12] = [
    TEAM_HEADER,
    COUNT_HEADER,
    SEQUENCE_HEADER,
    "真实姓名",
    "推荐人",
    "居住地",
    "职业",
    "出身年月日",
    "电话号码",
    "现在生活事业家庭情况",
    "想收获什么梦想",
    "有无宗教信仰",
];

/// 狭めに取る列
const COLUMN_WIDTHS: [(&str, f64); 7] = [
    (TEAM_HEADER, 10.0),
    (COUNT_HEADER, 10.0),
    (SEQUENCE_HEADER, 6.0),
    ("真实姓名", 12.0),
    ("推荐人", 12.0),
    ("出身年月日", 15.0),
    ("电话号码", 15.0),
];

/// 上記以外の列幅
pub const DEFAULT_COLUMN_WIDTH: f64 = 20.0;

/// 表頭名に対応する列幅
pub fn column_width_for(header: &str) -> f64 {
    COLUMN_WIDTHS
        .iter()
        .find(|(name, _)| *name == header.trim())
        .map(|(_, width)| *width)
        .unwrap_or(DEFAULT_COLUMN_WIDTH)
}
