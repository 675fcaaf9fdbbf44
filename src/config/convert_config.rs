// ==========================================
// 出库单转换工具 - 转换配置
// ==========================================
// 职责: 分类规则参数 / 模板固定值 / 输出格式
// 来源: JSON 文件（所有字段均有默认值），CLI 参数可覆写
// 查找顺序: 显式路径 → SALIDA_ALMACEN_CONFIG → 用户配置目录 → 内置默认
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "SALIDA_ALMACEN_CONFIG";

/// 用户配置目录下的子目录名
const CONFIG_DIR_NAME: &str = "salida-almacen";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// 无技术员物料行的处理策略
// ==========================================
// silent: 仅计数
// warn: 计数并逐行输出 warn 日志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTechnicianPolicy {
    Silent,
    #[default]
    Warn,
}

// ==========================================
// 输出分隔符
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
        }
    }
}

impl FromStr for Delimiter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "\t" {
            return Ok(Delimiter::Tab);
        }
        match s.trim().to_lowercase().as_str() {
            "tab" | "\\t" => Ok(Delimiter::Tab),
            "semicolon" | ";" => Ok(Delimiter::Semicolon),
            other => Err(ConfigError::InvalidValue {
                key: "output.delimiter".to_string(),
                value: other.to_string(),
                message: "仅支持 tab / semicolon".to_string(),
            }),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Semicolon => write!(f, "semicolon"),
        }
    }
}

// ==========================================
// 输出换行符
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl FromStr for LineEnding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crlf" | "windows" => Ok(LineEnding::Crlf),
            "lf" | "unix" => Ok(LineEnding::Lf),
            other => Err(ConfigError::InvalidValue {
                key: "output.line_ending".to_string(),
                value: other.to_string(),
                message: "仅支持 crlf / lf".to_string(),
            }),
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Crlf => write!(f, "crlf"),
            LineEnding::Lf => write!(f, "lf"),
        }
    }
}

// ==========================================
// OutputConfig - 模板输出格式
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub delimiter: Delimiter,
    pub line_ending: LineEnding,
    pub header_file: String,
    pub lines_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Tab,
            line_ending: LineEnding::Crlf,
            header_file: "Salida_Almacen_Cabecera.txt".to_string(),
            lines_file: "Salida_Almacen_Lineas.txt".to_string(),
        }
    }
}

// ==========================================
// TemplateConstants - 模板固定值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConstants {
    pub obj_type: String,
    pub doc_type: String,
    pub copy_flag: String,
    pub warehouse_code: String,
}

impl Default for TemplateConstants {
    fn default() -> Self {
        Self {
            obj_type: "60".to_string(),
            doc_type: "MANTENIMIENTO".to_string(),
            copy_flag: "ORIGINAL".to_string(),
            warehouse_code: "CAMARONE".to_string(),
        }
    }
}

// ==========================================
// ConvertConfig - 转换配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// 读取的工作表数量（前 N 个）
    pub max_sheets: usize,

    /// 扫描开始时的当前区域
    pub default_area: String,

    /// C 列为空时的事业部
    pub default_division: String,

    /// A 列包含任一标记即视为噪声行（大小写敏感）
    pub noise_markers: Vec<String>,

    /// B 列为这些标签（小写比较）时不视为区域声明
    pub area_header_labels: Vec<String>,

    /// 分区标题行中需剔除的词（大小写不敏感，子串）
    pub area_strip_tokens: Vec<String>,

    /// 仅剔除整词（FORTIN 之类的地名保持原样）
    pub area_strip_whole_words: bool,

    pub missing_technician: MissingTechnicianPolicy,

    pub output: OutputConfig,

    pub template: TemplateConstants,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_sheets: 2,
            default_area: "GENERAL".to_string(),
            default_division: "METRO".to_string(),
            noise_markers: vec![
                "Contratista".to_string(),
                "ENTRADAS".to_string(),
                "SALIDAS".to_string(),
            ],
            area_header_labels: vec!["area".to_string(), "division".to_string()],
            area_strip_tokens: ["COBRE", "FIBRA", "FO", "CU", "SALIDA", "ENTRADA"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            area_strip_whole_words: false,
            missing_technician: MissingTechnicianPolicy::Warn,
            output: OutputConfig::default(),
            template: TemplateConstants::default(),
        }
    }
}

impl ConvertConfig {
    /// 从 JSON 文本解析（缺失字段取默认值）
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: ConvertConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件读取
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 按查找顺序加载配置
    ///
    /// # 参数
    /// - explicit: 命令行显式指定的路径（存在则必须可读）
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        match resolve_config_path(explicit) {
            Some(path) => {
                info!(path = %path.display(), "加载配置文件");
                Self::from_file(&path)
            }
            None => {
                debug!("未找到配置文件，使用内置默认配置");
                Ok(Self::default())
            }
        }
    }

    /// 配置校验
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_sheets == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_sheets".to_string(),
                value: "0".to_string(),
                message: "至少读取一个工作表".to_string(),
            });
        }

        let required = [
            ("default_area", &self.default_area),
            ("default_division", &self.default_division),
            ("template.obj_type", &self.template.obj_type),
            ("template.doc_type", &self.template.doc_type),
            ("template.copy_flag", &self.template.copy_flag),
            ("template.warehouse_code", &self.template.warehouse_code),
            ("output.header_file", &self.output.header_file),
            ("output.lines_file", &self.output.lines_file),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                    message: "不能为空".to_string(),
                });
            }
        }

        if self.output.header_file == self.output.lines_file {
            return Err(ConfigError::InvalidValue {
                key: "output.lines_file".to_string(),
                value: self.output.lines_file.clone(),
                message: "表头与明细文件名不能相同".to_string(),
            });
        }

        Ok(())
    }
}

/// 解析配置文件路径
///
/// 1. 显式路径
/// 2. 环境变量 SALIDA_ALMACEN_CONFIG（非空）
/// 3. 用户配置目录下的 salida-almacen/config.json（存在时）
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
