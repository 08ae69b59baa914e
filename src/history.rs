//! 操作履歴
//!
//! 今回のセッションで追加した記録を新しい順に保持する。

use chrono::NaiveTime;
use futian_common::{Field, FieldMap};
use std::collections::VecDeque;

/// 値がないときの表示
const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub name: String,
    pub phone: String,
    pub occupation: String,
    /// HH:MM:SS
    pub time: String,
}

impl HistoryEntry {
    pub fn from_info(info: &FieldMap, at: NaiveTime) -> Self {
        let or_missing = |field: Field| {
            let value = info.get(field);
            if value.is_empty() {
                MISSING.to_string()
            } else {
                value.to_string()
            }
        };

        Self {
            name: or_missing(Field::RealName),
            phone: or_missing(Field::Phone),
            occupation: or_missing(Field::Occupation),
            time: at.format("%H:%M:%S").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(50)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// 先頭に追加（上限を超えた古いものは捨てる）
    pub fn record(&mut self, info: &FieldMap, at: NaiveTime) {
        self.entries.push_front(HistoryEntry::from_info(info, at));
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 新しい順
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
