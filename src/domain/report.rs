// ==========================================
// 出库单转换工具 - 转换报告
// ==========================================
// 用途: 统计一次运行中各类行的处理结果（含被丢弃的无技术员行）
// ==========================================

use serde::{Deserialize, Serialize};

/// 因缺少技术员上下文而被丢弃的物料行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRow {
    pub row_index: usize, // 归一化后行序号（0 起）
    pub item_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    pub run_id: String,
    pub run_date: String, // YYYYMMDD

    // ===== 行分类统计 =====
    pub rows_scanned: usize,
    pub noise_rows: usize,
    pub section_headers: usize,
    pub area_declarations: usize, // B 列显式声明区域的物料行
    pub skipped_non_material: usize,
    pub dropped_missing_technician: usize,
    pub quantity_defaulted: usize,
    pub material_lines: usize,

    // ===== 输出统计 =====
    pub documents: usize,
    pub document_lines: usize,

    pub dropped_rows: Vec<DroppedRow>,
}

impl ConversionReport {
    pub fn new(run_id: impl Into<String>, run_date: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            run_date: run_date.into(),
            ..Default::default()
        }
    }
}
