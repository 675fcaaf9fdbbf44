// ==========================================
// 出库单转换工具 - 网格归一化
// ==========================================
// 职责: 多工作表 → 单一 7 列行序列
// 规则:
// - 仅取前 max_sheets 个工作表，按下标顺序拼接
// - 每行补齐/截断为 7 列 (A-G)
// - 丢弃 7 列全空的行；空工作表直接跳过
// ==========================================

use crate::domain::types::{RawRow, SheetGrid};
use tracing::debug;

pub struct GridNormalizer {
    max_sheets: usize,
}

impl GridNormalizer {
    pub fn new(max_sheets: usize) -> Self {
        Self { max_sheets }
    }

    pub fn normalize(&self, sheets: &[SheetGrid]) -> Vec<RawRow> {
        let mut rows = Vec::new();

        for sheet in sheets.iter().take(self.max_sheets) {
            if sheet.is_empty() {
                debug!(sheet = %sheet.name, "空工作表，跳过");
                continue;
            }

            let before = rows.len();
            rows.extend(
                sheet
                    .rows
                    .iter()
                    .map(|cells| RawRow::from_cells(cells.iter().cloned()))
                    .filter(|row| !row.is_blank()),
            );
            debug!(
                sheet = %sheet.name,
                raw_rows = sheet.rows.len(),
                kept_rows = rows.len() - before,
                "工作表归一化完成"
            );
        }

        rows
    }
}

impl Default for GridNormalizer {
    fn default() -> Self {
        Self::new(2)
    }
}
