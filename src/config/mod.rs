// ==========================================
// 出库单转换工具 - 配置层
// ==========================================
// 职责: 转换规则参数、模板固定值、输出格式
// 存储: JSON 文件（可选）
// ==========================================

pub mod convert_config;
pub mod error;

// 重导出核心配置类型
pub use convert_config::{
    resolve_config_path, ConvertConfig, Delimiter, LineEnding, MissingTechnicianPolicy,
    OutputConfig, TemplateConstants, CONFIG_ENV_VAR,
};
pub use error::{ConfigError, ConfigResult};
