// ==========================================
// 出库单转换工具 - 引擎层
// ==========================================
// 职责: 行分类 / 分组 / 单据装配 / 转换编排
// 红线: 单线程单次前向扫描，行序即语义，不可并行或重排
// ==========================================

pub mod converter;
pub mod document_assembler;
pub mod error;
pub mod grouping_engine;
pub mod row_classifier;

// 重导出核心引擎
pub use converter::{ConversionOutcome, Converter};
pub use document_assembler::DocumentAssembler;
pub use error::{ConvertError, ConvertResult};
pub use grouping_engine::{DocumentGroups, GroupingEngine};
pub use row_classifier::{MaterialLine, RowClassifier, RowOutcome, RunState};
