// ==========================================
// 出库单转换工具 - 单据装配器
// ==========================================
// 职责: 保序分组 → 模板表头 + 明细
// 规则:
// - DocNum 从 1 开始，按分组首次出现顺序递增
// - DocDate 取分组日期，缺失时取本次运行日期（每次运行只计算一次）
// - LineNum 在单据内从 0 重新编号
// - 零分组 → None（空结果信号，不生成零行文件）
// ==========================================

use crate::config::TemplateConstants;
use crate::domain::document::{DocumentHeader, DocumentLine, TemplateBundle};
use crate::engine::grouping_engine::DocumentGroups;
use tracing::info;

pub struct DocumentAssembler<'a> {
    template: &'a TemplateConstants,
    run_date: &'a str,
}

impl<'a> DocumentAssembler<'a> {
    /// # 参数
    /// - template: 模板固定值
    /// - run_date: 运行日期 YYYYMMDD（无日期分组共用）
    pub fn new(template: &'a TemplateConstants, run_date: &'a str) -> Self {
        Self { template, run_date }
    }

    pub fn assemble(&self, groups: &DocumentGroups) -> Option<TemplateBundle> {
        if groups.is_empty() {
            info!("无有效单据分组，返回空结果");
            return None;
        }

        let mut bundle = TemplateBundle::default();

        for (doc_num, group) in (1u32..).zip(groups.values()) {
            let doc_date = group
                .document_date
                .clone()
                .unwrap_or_else(|| self.run_date.to_string());

            bundle.headers.push(DocumentHeader {
                doc_num,
                obj_type: self.template.obj_type.clone(),
                doc_date,
                division: group.division.clone(),
                area: group.area.clone(),
                doc_type: self.template.doc_type.clone(),
                contractor: group.technician.clone(),
                copy_flag: self.template.copy_flag.clone(),
                comments: group.comment.clone(),
            });

            for (line_num, item) in (0u32..).zip(group.lines.iter()) {
                bundle.lines.push(DocumentLine {
                    parent_key: doc_num,
                    line_num,
                    item_code: item.item_code.clone(),
                    quantity: item.quantity,
                    warehouse_code: self.template.warehouse_code.clone(),
                    contractor: group.technician.clone(),
                    area: group.area.clone(),
                });
            }
        }

        info!(
            documents = bundle.headers.len(),
            lines = bundle.lines.len(),
            "单据装配完成"
        );
        Some(bundle)
    }
}
