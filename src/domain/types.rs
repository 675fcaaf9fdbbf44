// ==========================================
// 出库单转换工具 - 领域类型定义
// ==========================================
// 职责: 单元格值 / 原始行 / 列位置
// 红线: 原始行永远是 7 列 (A-G)，缺失单元格为 Empty，不省略
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 报表固定列数 (A-G)
pub const ROW_WIDTH: usize = 7;

// ==========================================
// 列位置 (Column)
// ==========================================
// A=技术员/分区标签 B=区域 C=事业部 D=物料编码 E=未使用 F=数量 G=备注/日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Column {
    pub fn index(self) -> usize {
        match self {
            Column::A => 0,
            Column::B => 1,
            Column::C => 2,
            Column::D => 3,
            Column::E => 4,
            Column::F => 5,
            Column::G => 6,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Column::A => "A",
            Column::B => "B",
            Column::C => "C",
            Column::D => "D",
            Column::E => "E",
            Column::F => "F",
            Column::G => "G",
        };
        write!(f, "{}", letter)
    }
}

// ==========================================
// 单元格值 (CellValue)
// ==========================================
// 来源: 工作簿解码器 (calamine) 或 CSV
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// 空值判定：Empty 或空字符串（纯空白不算空，交由分类器 trim 后判断）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 数值视图
    ///
    /// - Number: 原值
    /// - Text: trim 后按浮点数解析
    /// - Bool: 1 / 0
    /// - 其他: None
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

// ==========================================
// 原始行 (RawRow)
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRow {
    cells: [CellValue; ROW_WIDTH],
}

impl RawRow {
    /// 由任意长度的单元格序列构造：不足补 Empty，超出截断
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = CellValue>,
    {
        let mut row = RawRow::default();
        for (slot, cell) in row.cells.iter_mut().zip(cells) {
            *slot = cell;
        }
        row
    }

    pub fn cell(&self, column: Column) -> &CellValue {
        &self.cells[column.index()]
    }

    pub fn cells(&self) -> &[CellValue; ROW_WIDTH] {
        &self.cells
    }

    /// 单元格的 trim 文本视图（空 → ""）
    pub fn text(&self, column: Column) -> String {
        self.cell(column).to_string().trim().to_string()
    }

    /// 7 个单元格全部为空
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

// ==========================================
// 工作表网格 (SheetGrid)
// ==========================================
// 解码器输出：每个工作表一个不定宽的单元格矩阵，第 0 行即数据（无表头）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
