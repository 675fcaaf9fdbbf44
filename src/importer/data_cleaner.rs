// ==========================================
// 出库单转换工具 - 数据清洗器实现
// ==========================================
// 职责: 备注日期提取 / 分区标签清洗 / 物料编码截断 / 数量解析
// 红线: 单元格解析失败只在本地恢复（数量 → 0），不向上传播
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::CellValue;
use regex::Regex;

/// dd/mm/yyyy（不校验日、月取值范围）
const DATE_PATTERN: &str = r"(\d{2})/(\d{2})/(\d{4})";

pub struct DataCleaner {
    date_pattern: Regex,
    area_strip_pattern: Regex,
}

impl DataCleaner {
    /// 创建清洗器
    ///
    /// # 参数
    /// - strip_tokens: 分区标题中需剔除的词（大小写不敏感）
    /// - whole_words: true 时仅剔除整词；默认按子串剔除
    pub fn new(strip_tokens: &[String], whole_words: bool) -> ConfigResult<Self> {
        let date_pattern = compile("date_pattern", DATE_PATTERN)?;

        let tokens: Vec<String> = strip_tokens
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();
        let strip_source = match (tokens.is_empty(), whole_words) {
            (true, _) => DATE_PATTERN.to_string(),
            (false, false) => format!(r"(?i)(?:{})|{}", tokens.join("|"), DATE_PATTERN),
            (false, true) => format!(r"(?i)\b(?:{})\b|{}", tokens.join("|"), DATE_PATTERN),
        };
        let area_strip_pattern = compile("area_strip_tokens", &strip_source)?;

        Ok(Self {
            date_pattern,
            area_strip_pattern,
        })
    }

    /// 从任意文本中提取第一个 dd/mm/yyyy，转为 YYYYMMDD
    ///
    /// 年、月、日按原文拼接，不做数值归一化
    pub fn extract_document_date(&self, text: &str) -> Option<String> {
        let caps = self.date_pattern.captures(text)?;
        Some(format!("{}{}{}", &caps[3], &caps[2], &caps[1]))
    }

    /// 分区标题清洗：剔除材质/方向词与日期后 trim
    pub fn clean_area_label(&self, label: &str) -> String {
        self.area_strip_pattern
            .replace_all(label, "")
            .trim()
            .to_string()
    }

    /// 物料编码：取第一个 '.' 之前的部分（去掉表格强加的小数后缀）
    pub fn clean_item_code(raw: &str) -> String {
        raw.split('.').next().unwrap_or_default().trim().to_string()
    }

    /// 数量：数值或可解析文本；空值、解析失败、非有限值返回 None
    pub fn parse_quantity(cell: &CellValue) -> Option<f64> {
        cell.as_number().filter(|q| q.is_finite())
    }
}

fn compile(key: &str, source: &str) -> ConfigResult<Regex> {
    Regex::new(source).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: source.to_string(),
        message: e.to_string(),
    })
}
