// ==========================================
// 出库单转换工具 - 导入层
// ==========================================
// 职责: 报表文件解码、网格归一化、单元格清洗
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod grid_normalizer;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser, WorkbookReader};
pub use grid_normalizer::GridNormalizer;
