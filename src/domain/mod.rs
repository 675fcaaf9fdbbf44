// ==========================================
// 出库单转换工具 - 领域模型层
// ==========================================
// 职责: 定义单元格、原始行、单据分组与模板记录
// 红线: 不含解析逻辑，不含文件读写
// ==========================================

pub mod document;
pub mod report;
pub mod types;

// 重导出核心类型
pub use document::{
    DocumentGroup, DocumentHeader, DocumentLine, GroupKey, LineItem, TemplateBundle,
};
pub use report::{ConversionReport, DroppedRow};
pub use types::{CellValue, Column, RawRow, SheetGrid, ROW_WIDTH};
