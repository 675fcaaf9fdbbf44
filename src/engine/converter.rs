// ==========================================
// 出库单转换工具 - 转换编排器
// ==========================================
// 流程: 读取 → 归一化 → 分类/分组 → 装配 → (写出)
// 说明:
// - 每次转换生成 run_id，运行日期只计算一次
// - 零单据返回 Empty 结果，由调用方决定是否视为错误
// ==========================================

use crate::config::ConvertConfig;
use crate::domain::document::TemplateBundle;
use crate::domain::report::ConversionReport;
use crate::domain::types::SheetGrid;
use crate::engine::document_assembler::DocumentAssembler;
use crate::engine::error::{ConvertError, ConvertResult};
use crate::engine::grouping_engine::GroupingEngine;
use crate::exporter::{TemplateWriter, WrittenFiles};
use crate::importer::{GridNormalizer, WorkbookReader};
use chrono::{Local, NaiveDate};
use std::path::Path;
use tracing::{info, instrument, warn, Span};
use uuid::Uuid;

/// 运行日期格式
const RUN_DATE_FORMAT: &str = "%Y%m%d";

// ==========================================
// ConversionOutcome - 转换结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted {
        bundle: TemplateBundle,
        report: ConversionReport,
    },
    /// 无任何单据（空输入或全部行被过滤）
    Empty { report: ConversionReport },
}

impl ConversionOutcome {
    pub fn report(&self) -> &ConversionReport {
        match self {
            ConversionOutcome::Converted { report, .. } => report,
            ConversionOutcome::Empty { report } => report,
        }
    }

    pub fn bundle(&self) -> Option<&TemplateBundle> {
        match self {
            ConversionOutcome::Converted { bundle, .. } => Some(bundle),
            ConversionOutcome::Empty { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ConversionOutcome::Empty { .. })
    }
}

// ==========================================
// Converter - 转换编排器
// ==========================================
pub struct Converter {
    config: ConvertConfig,
    normalizer: GridNormalizer,
    engine: GroupingEngine,
    run_date: Option<String>, // 固定运行日期；None 时每次转换取当天
}

impl Converter {
    pub fn new(config: ConvertConfig) -> ConvertResult<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: GridNormalizer::new(config.max_sheets),
            engine: GroupingEngine::new(&config)?,
            config,
            run_date: None,
        })
    }

    /// 固定运行日期（YYYYMMDD），用于补录或可重复输出
    pub fn with_run_date(mut self, run_date: &str) -> ConvertResult<Self> {
        let trimmed = run_date.trim();
        let is_valid = trimmed.len() == 8
            && NaiveDate::parse_from_str(trimmed, RUN_DATE_FORMAT).is_ok();
        if !is_valid {
            return Err(ConvertError::InvalidRunDate(run_date.to_string()));
        }
        self.run_date = Some(trimmed.to_string());
        Ok(self)
    }

    fn resolve_run_date(&self) -> String {
        self.run_date
            .clone()
            .unwrap_or_else(|| Local::now().format(RUN_DATE_FORMAT).to_string())
    }

    /// 转换已解码的工作表网格
    #[instrument(skip_all, fields(run_id))]
    pub fn convert_sheets(&self, sheets: &[SheetGrid]) -> ConversionOutcome {
        let run_id = Uuid::new_v4().to_string();
        Span::current().record("run_id", run_id.as_str());

        let run_date = self.resolve_run_date();
        let mut report = ConversionReport::new(run_id, run_date.clone());

        let rows = self.normalizer.normalize(sheets);
        info!(sheets = sheets.len(), rows = rows.len(), "网格归一化完成");

        let groups = self.engine.group_rows(&rows, &mut report);

        let assembler = DocumentAssembler::new(&self.config.template, &run_date);
        match assembler.assemble(&groups) {
            Some(bundle) => {
                report.documents = bundle.headers.len();
                report.document_lines = bundle.lines.len();
                info!(
                    documents = report.documents,
                    lines = report.document_lines,
                    "转换完成"
                );
                ConversionOutcome::Converted { bundle, report }
            }
            None => {
                warn!(rows = report.rows_scanned, "未生成任何单据");
                ConversionOutcome::Empty { report }
            }
        }
    }

    /// 读取报表文件并转换（解码失败为致命错误）
    pub fn convert_file(
        &self,
        reader: &dyn WorkbookReader,
        file_path: &Path,
    ) -> ConvertResult<ConversionOutcome> {
        let sheets = reader.read_sheets(file_path, self.config.max_sheets)?;
        Ok(self.convert_sheets(&sheets))
    }

    /// 转换并写出模板文件；空结果不写文件
    pub fn convert_file_to_dir(
        &self,
        reader: &dyn WorkbookReader,
        file_path: &Path,
        out_dir: &Path,
    ) -> ConvertResult<(ConversionOutcome, Option<WrittenFiles>)> {
        let outcome = self.convert_file(reader, file_path)?;

        let written = match outcome.bundle() {
            Some(bundle) => {
                let output = &self.config.output;
                let writer = TemplateWriter::from_config(output);
                Some(writer.write_bundle(bundle, out_dir, &output.header_file, &output.lines_file)?)
            }
            None => None,
        };

        Ok((outcome, written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellValue;

    fn sheet(rows: Vec<Vec<&str>>) -> SheetGrid {
        SheetGrid::new(
            "Hoja1",
            rows.into_iter()
                .map(|r| {
                    r.into_iter()
                        .map(|v| {
                            if v.is_empty() {
                                CellValue::Empty
                            } else {
                                CellValue::from(v)
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_invalid_run_date_rejected() {
        let converter = Converter::new(ConvertConfig::default()).unwrap();
        assert!(matches!(
            converter.with_run_date("2024-02-01"),
            Err(ConvertError::InvalidRunDate(_))
        ));

        let converter = Converter::new(ConvertConfig::default()).unwrap();
        assert!(converter.with_run_date("20241301").is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ConvertConfig {
            max_sheets: 0,
            ..ConvertConfig::default()
        };
        assert!(matches!(Converter::new(config), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_empty_sheets_yield_empty_outcome() {
        let converter = Converter::new(ConvertConfig::default()).unwrap();
        let outcome = converter.convert_sheets(&[]);
        assert!(outcome.is_empty());
        assert_eq!(outcome.report().documents, 0);
        assert!(outcome.bundle().is_none());
    }

    #[test]
    fn test_run_date_fallback_shared_by_groups() {
        let converter = Converter::new(ConvertConfig::default())
            .unwrap()
            .with_run_date("20261018")
            .unwrap();
        let outcome = converter.convert_sheets(&[sheet(vec![
            vec!["Juan", "", "", "1", "", "1", "sin fecha"],
            vec!["Ana", "", "", "2", "", "1", ""],
        ])]);

        let bundle = outcome.bundle().unwrap();
        assert_eq!(bundle.headers.len(), 2);
        assert!(bundle.headers.iter().all(|h| h.doc_date == "20261018"));
        assert_eq!(outcome.report().run_date, "20261018");
        assert!(!outcome.report().run_id.is_empty());
    }
}
