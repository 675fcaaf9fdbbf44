// ==========================================
// 出库单转换工具 - 单据领域模型
// ==========================================
// 职责: 分组键 / 单据分组 / 模板输出记录
// 对齐: SAP 出库单导入模板（表头 9 字段，明细 7 字段）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// GroupKey - 单据分组键
// ==========================================
// 一个 (技术员, 区域) 组合对应一张输出单据；相等性为 trim 后的精确字符串匹配
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub technician: String,
    pub area: String,
}

impl GroupKey {
    pub fn new(technician: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            technician: technician.into(),
            area: area.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.technician, self.area)
    }
}

// ==========================================
// LineItem - 物料明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_code: String,
    pub quantity: f64,
}

// ==========================================
// DocumentGroup - 单据累加器
// ==========================================
// 红线: division / comment / document_date 首行决定，后续行不覆盖；lines 只追加
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentGroup {
    pub division: String,
    pub area: String,
    pub technician: String,
    pub comment: String,
    pub document_date: Option<String>, // YYYYMMDD，缺失时装配阶段回退为运行日期
    pub lines: Vec<LineItem>,
}

// ==========================================
// DocumentHeader - 模板表头记录（cabecera）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHeader {
    pub doc_num: u32,
    pub obj_type: String,
    pub doc_date: String,
    pub division: String,
    pub area: String,
    pub doc_type: String,
    pub contractor: String,
    pub copy_flag: String,
    pub comments: String,
}

impl DocumentHeader {
    /// 技术字段名（模板第一行）
    pub const FIELD_NAMES: [&'static str; 9] = [
        "DocNum",
        "ObjType",
        "DocDate",
        "U_DIVISION",
        "U_AREA",
        "U_TipoP",
        "U_CONTRATISTA",
        "U_COPIA",
        "Comments",
    ];

    /// 显示标签（模板第二行，导入工具要求双表头）
    pub const DISPLAY_LABELS: [&'static str; 9] = [
        "DocNum",
        "DocObjectCode",
        "DocDate",
        "U_DIVISION",
        "U_AREA",
        "U_TipoP",
        "U_CONTRATISTA",
        "U_COPIA",
        "Comments",
    ];

    /// 按模板字段顺序输出
    pub fn to_fields(&self) -> [String; 9] {
        [
            self.doc_num.to_string(),
            self.obj_type.clone(),
            self.doc_date.clone(),
            self.division.clone(),
            self.area.clone(),
            self.doc_type.clone(),
            self.contractor.clone(),
            self.copy_flag.clone(),
            self.comments.clone(),
        ]
    }
}

// ==========================================
// DocumentLine - 模板明细记录（lineas）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub parent_key: u32,
    pub line_num: u32,
    pub item_code: String,
    pub quantity: f64,
    pub warehouse_code: String,
    pub contractor: String,
    pub area: String,
}

impl DocumentLine {
    pub const FIELD_NAMES: [&'static str; 7] = [
        "ParentKey",
        "LineNum",
        "ItemCode",
        "Quantity",
        "WhsCode",
        "U_CONTRATISTA",
        "U_AREA",
    ];

    pub const DISPLAY_LABELS: [&'static str; 7] = [
        "DocNum",
        "LineNum",
        "ItemCode",
        "Quantity",
        "WarehouseCode",
        "U_CONTRATISTA",
        "U_AREA",
    ];

    pub fn to_fields(&self) -> [String; 7] {
        [
            self.parent_key.to_string(),
            self.line_num.to_string(),
            self.item_code.clone(),
            self.quantity.to_string(),
            self.warehouse_code.clone(),
            self.contractor.clone(),
            self.area.clone(),
        ]
    }
}

// ==========================================
// TemplateBundle - 装配结果（两份记录集合）
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateBundle {
    pub headers: Vec<DocumentHeader>,
    pub lines: Vec<DocumentLine>,
}

impl TemplateBundle {
    /// 某张单据的明细
    pub fn lines_of(&self, doc_num: u32) -> impl Iterator<Item = &DocumentLine> {
        self.lines.iter().filter(move |l| l.parent_key == doc_num)
    }
}
