// ==========================================
// 出库单转换工具 - 行分类器
// ==========================================
// 职责: 单行分类 + 运行状态折叠 (RunState, RawRow) → (RunState, RowOutcome)
// 规则（按序，首个命中生效）:
// 1. 噪声行: A 列含噪声标记，或 A/B/D 三列皆空 → 跳过，状态不变
// 2. 显式区域: B、D 非空且 B 不是列标题 → 更新当前区域，继续第 4 步
// 3. 分区标题（仅当第 2 步未命中）: A 非空、D 为空 → 清洗标签更新区域，本行终止
// 4. 物料过滤: D 为空 / "nan" / 列标题 → 跳过
// 5. 技术员: A 非空则更新；仍无技术员 → 丢弃
// 6. 字段提取: 事业部 / 物料编码 / 数量 / 备注 / 单据日期
// 红线: 单次前向扫描，无回看，无回溯；行序即语义
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::ConvertConfig;
use crate::domain::document::GroupKey;
use crate::domain::types::{Column, RawRow};
use crate::importer::data_cleaner::DataCleaner;
use serde::{Deserialize, Serialize};

/// 混入数据区的 D 列标题
const ITEM_CODE_TITLE: &str = "número de artículo";

// ==========================================
// RunState - 扫描运行状态
// ==========================================
// 当前技术员、当前区域向后携带，直到被覆盖
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub current_technician: Option<String>,
    pub current_area: String,
}

impl RunState {
    pub fn new(default_area: impl Into<String>) -> Self {
        Self {
            current_technician: None,
            current_area: default_area.into(),
        }
    }
}

// ==========================================
// MaterialLine - 物料行提取结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub key: GroupKey,
    pub division: String,
    pub item_code: String,
    pub quantity: f64,
    pub quantity_defaulted: bool, // 数量为空或解析失败，按 0 处理
    pub comment: String,
    pub document_date: Option<String>,
    pub area_declared: bool, // 本行 B 列同时声明了区域
}

// ==========================================
// RowOutcome - 单行分类结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowOutcome {
    /// 噪声行（状态不变）
    Noise,
    /// 分区标题行；area 为清洗后的新区域（清洗后为空则为 None，区域不变）
    SectionHeader { area: Option<String> },
    /// 非物料行（D 列缺失或为列标题）
    NotMaterial,
    /// 物料行但无技术员上下文，整行丢弃
    MissingTechnician { item_code: String },
    /// 有效物料行
    Material(MaterialLine),
}

// ==========================================
// RowClassifier - 行分类器
// ==========================================
pub struct RowClassifier {
    noise_markers: Vec<String>,
    area_header_labels: Vec<String>,
    default_division: String,
    cleaner: DataCleaner,
}

impl RowClassifier {
    pub fn new(config: &ConvertConfig) -> ConfigResult<Self> {
        Ok(Self {
            noise_markers: config
                .noise_markers
                .iter()
                .filter(|m| !m.is_empty())
                .cloned()
                .collect(),
            area_header_labels: config
                .area_header_labels
                .iter()
                .map(|l| l.trim().to_lowercase())
                .collect(),
            default_division: config.default_division.clone(),
            cleaner: DataCleaner::new(&config.area_strip_tokens, config.area_strip_whole_words)?,
        })
    }

    /// 分类单行并推进运行状态
    pub fn classify(&self, mut state: RunState, row: &RawRow) -> (RunState, RowOutcome) {
        let col0 = row.text(Column::A);
        let col1 = row.text(Column::B);
        let col3 = row.text(Column::D);

        // 1. 噪声
        let is_noise = self.noise_markers.iter().any(|m| col0.contains(m.as_str()))
            || (col0.is_empty() && col1.is_empty() && col3.is_empty());
        if is_noise {
            return (state, RowOutcome::Noise);
        }

        // 2. 显式区域（同一行可同时携带物料）
        let area_declared = !col1.is_empty()
            && !col3.is_empty()
            && !self.area_header_labels.contains(&col1.to_lowercase());
        if area_declared {
            state.current_area = col1;
        } else if !col0.is_empty() && col3.is_empty() {
            // 3. 分区标题
            let label = self.cleaner.clean_area_label(&col0);
            let area = if label.is_empty() {
                None
            } else {
                state.current_area = label.clone();
                Some(label)
            };
            return (state, RowOutcome::SectionHeader { area });
        }

        // 4. 物料过滤
        let col3_lower = col3.to_lowercase();
        if col3.is_empty() || col3_lower == "nan" || col3_lower == ITEM_CODE_TITLE {
            return (state, RowOutcome::NotMaterial);
        }

        let item_code = DataCleaner::clean_item_code(&row.cell(Column::D).to_string());

        // 5. 技术员
        if !col0.is_empty() {
            state.current_technician = Some(col0);
        }
        let technician = match state.current_technician.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return (state, RowOutcome::MissingTechnician { item_code }),
        };

        // 6. 字段提取
        let division = match row.text(Column::C) {
            d if d.is_empty() => self.default_division.clone(),
            d => d,
        };
        let (quantity, quantity_defaulted) = match DataCleaner::parse_quantity(row.cell(Column::F)) {
            Some(q) => (q, false),
            None => (0.0, true),
        };
        let comment = row.text(Column::G);
        let document_date = self.cleaner.extract_document_date(&comment);

        let line = MaterialLine {
            key: GroupKey::new(technician, state.current_area.clone()),
            division,
            item_code,
            quantity,
            quantity_defaulted,
            comment,
            document_date,
            area_declared,
        };
        (state, RowOutcome::Material(line))
    }
}
