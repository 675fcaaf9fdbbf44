// ==========================================
// 出库单转换工具 - 分组引擎
// ==========================================
// 职责: 顺序扫描归一化行，按 (技术员, 区域) 聚合物料明细
// 红线:
// - 保序映射：单据编号顺序 = 分组键首次出现顺序
// - 分组首行决定 division / comment / document_date，后续行只追加明细
// - 无技术员物料行丢弃，但必须计数（可选逐行 warn）
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::{ConvertConfig, MissingTechnicianPolicy};
use crate::domain::document::{DocumentGroup, GroupKey, LineItem};
use crate::domain::report::{ConversionReport, DroppedRow};
use crate::domain::types::RawRow;
use crate::engine::row_classifier::{MaterialLine, RowClassifier, RowOutcome, RunState};
use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

/// 保序分组映射
pub type DocumentGroups = IndexMap<GroupKey, DocumentGroup>;

pub struct GroupingEngine {
    classifier: RowClassifier,
    default_area: String,
    missing_technician: MissingTechnicianPolicy,
}

impl GroupingEngine {
    pub fn new(config: &ConvertConfig) -> ConfigResult<Self> {
        Ok(Self {
            classifier: RowClassifier::new(config)?,
            default_area: config.default_area.clone(),
            missing_technician: config.missing_technician,
        })
    }

    /// 扫描全部行，返回保序分组；分类统计写入 report
    pub fn group_rows(&self, rows: &[RawRow], report: &mut ConversionReport) -> DocumentGroups {
        let mut groups = DocumentGroups::new();
        let mut state = RunState::new(self.default_area.clone());

        for (row_index, row) in rows.iter().enumerate() {
            report.rows_scanned += 1;

            let (next, outcome) = self.classifier.classify(state, row);
            state = next;
            trace!(row_index, outcome = ?outcome, "行分类");

            match outcome {
                RowOutcome::Noise => report.noise_rows += 1,
                RowOutcome::SectionHeader { area } => {
                    report.section_headers += 1;
                    if let Some(area) = area {
                        debug!(row_index, area = %area, "分区标题，切换当前区域");
                    }
                }
                RowOutcome::NotMaterial => report.skipped_non_material += 1,
                RowOutcome::MissingTechnician { item_code } => {
                    report.dropped_missing_technician += 1;
                    match self.missing_technician {
                        MissingTechnicianPolicy::Warn => {
                            warn!(row_index, item_code = %item_code, "物料行缺少技术员，已丢弃")
                        }
                        MissingTechnicianPolicy::Silent => {
                            debug!(row_index, item_code = %item_code, "物料行缺少技术员，已丢弃")
                        }
                    }
                    report.dropped_rows.push(DroppedRow {
                        row_index,
                        item_code,
                    });
                }
                RowOutcome::Material(line) => {
                    report.material_lines += 1;
                    if line.area_declared {
                        report.area_declarations += 1;
                    }
                    if line.quantity_defaulted {
                        report.quantity_defaulted += 1;
                    }
                    Self::append_line(&mut groups, line);
                }
            }
        }

        info!(
            rows = report.rows_scanned,
            material_lines = report.material_lines,
            groups = groups.len(),
            dropped = report.dropped_missing_technician,
            "行扫描完成"
        );
        groups
    }

    /// 追加到对应分组；分组不存在时以本行字段创建
    fn append_line(groups: &mut DocumentGroups, line: MaterialLine) {
        let MaterialLine {
            key,
            division,
            item_code,
            quantity,
            comment,
            document_date,
            ..
        } = line;

        let group = groups.entry(key).or_insert_with_key(|key| {
            debug!(group = %key, "新建单据分组");
            DocumentGroup {
                division,
                area: key.area.clone(),
                technician: key.technician.clone(),
                comment,
                document_date,
                lines: Vec::new(),
            }
        });
        group.lines.push(LineItem {
            item_code,
            quantity,
        });
    }
}
