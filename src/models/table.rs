//! 结果表：累加器按发现顺序转成的行列结构

use crate::models::MoleculeRecord;
use crate::services::Accumulator;
use crate::utils::logging::truncate_text;

/// 结果表列名
pub const COLUMNS: [&str; 6] = [
    "molecule_chembl_id",
    "target",
    "activity_type",
    "activity_value",
    "activity_units",
    "assay_description",
];

/// 渲染时单元格的最大字符数
const MAX_CELL_WIDTH: usize = 48;

/// 结果表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<MoleculeRecord>,
}

impl ResultTable {
    /// 从累加器构建，行顺序即发现顺序
    pub fn from_accumulator(accumulator: Accumulator) -> Self {
        Self {
            rows: accumulator.into_records(),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[MoleculeRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 前 `n` 行
    pub fn head(&self, n: usize) -> &[MoleculeRecord] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// 把前 `n` 行渲染成等宽文本表
    pub fn render(&self, n: usize) -> String {
        let cells: Vec<[String; 6]> = self
            .head(n)
            .iter()
            .map(|row| row.cells().map(|cell| truncate_text(&cell, MAX_CELL_WIDTH)))
            .collect();

        let mut widths: [usize; 6] = COLUMNS.map(|c| c.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, COLUMNS.iter().copied(), &widths);
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, separator.iter().map(String::as_str), &widths);
        for row in &cells {
            push_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 6]) {
    let line = cells
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
