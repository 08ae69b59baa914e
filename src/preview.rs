//! 末尾数件のプレビュー

use futian_common::Workbook;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub headers: Vec<String>,
    /// 末尾 n 行（古い順）
    pub rows: Vec<Vec<String>>,
    /// データ行の総数（表頭を除く）
    pub total_records: usize,
}

impl Preview {
    pub fn from_workbook(workbook: &Workbook, last: usize) -> Self {
        let headers: Vec<String> = workbook
            .row(1)
            .iter()
            .map(|c| c.value.to_display_string())
            .collect();
        let width = headers.len().max(workbook.max_column() as usize);

        let data = workbook.rows().get(1..).unwrap_or(&[]);
        let skip = data.len().saturating_sub(last);
        let rows = data[skip..]
            .iter()
            .map(|cells| {
                (0..width)
                    .map(|i| {
                        cells
                            .get(i)
                            .map(|c| c.value.to_display_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self {
            headers,
            rows,
            total_records: workbook.record_count(),
        }
    }
}

/// 改行を含む値は1行に畳む
fn flatten(value: &str) -> String {
    value.replace('\n', " / ")
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "当前表格共有 {} 条数据，预览最后 {} 条：",
            self.total_records,
            self.rows.len()
        )?;
        writeln!(f, "{}", self.headers.join(" | "))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|v| flatten(v)).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}
