// ==========================================
// 出库单转换工具 - 转换流程错误类型
// ==========================================
// 说明: 行级问题（数量无法解析、缺少技术员）在引擎内部恢复，不出现在这里
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("运行日期格式错误: 期望 YYYYMMDD，实际 {0}")]
    InvalidRunDate(String),
}

/// Result 类型别名
pub type ConvertResult<T> = Result<T, ConvertError>;
