// ==========================================
// 出库单转换工具 - 核心库
// ==========================================
// 输入: 技术员领料报表（多分区、版式化的 Excel）
// 输出: SAP 出库单导入模板（表头文件 + 明细文件）
// 核心: 有状态的行分类与分组引擎
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格 / 行 / 单据
pub mod domain;

// 导入层 - 文件解码与归一化
pub mod importer;

// 引擎层 - 分类、分组、装配
pub mod engine;

// 输出层 - 模板写出
pub mod exporter;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConvertConfig, Delimiter, LineEnding, MissingTechnicianPolicy};
pub use domain::{
    CellValue, ConversionReport, DocumentGroup, DocumentHeader, DocumentLine, GroupKey,
    LineItem, RawRow, SheetGrid, TemplateBundle,
};
pub use engine::{ConversionOutcome, ConvertError, ConvertResult, Converter};
pub use exporter::{TemplateWriter, WrittenFiles};
pub use importer::{UniversalFileParser, WorkbookReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "salida-almacen";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
