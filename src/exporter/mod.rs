// ==========================================
// 出库单转换工具 - 输出层
// ==========================================
// 职责: 模板记录序列化为分隔文本文件
// ==========================================

pub mod error;
pub mod template_writer;

pub use error::{ExportError, ExportResult};
pub use template_writer::{TemplateWriter, WrittenFiles};
