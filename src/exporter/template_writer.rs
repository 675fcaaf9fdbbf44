// ==========================================
// 出库单转换工具 - 模板写出器
// ==========================================
// 职责: 结构化记录 → 分隔文本（表头文件 + 明细文件）
// 格式:
// - 第 1 行技术字段名，第 2 行显示标签（导入工具要求双表头）
// - 每条记录一行，字段顺序固定
// - 分隔符 tab / 分号，换行 CRLF / LF 由配置决定
// ==========================================

use crate::config::{Delimiter, LineEnding, OutputConfig};
use crate::domain::document::{DocumentHeader, DocumentLine, TemplateBundle};
use crate::exporter::error::{ExportError, ExportResult};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// 写出结果：两个文件的路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFiles {
    pub header_file: PathBuf,
    pub lines_file: PathBuf,
}

pub struct TemplateWriter {
    delimiter: Delimiter,
    line_ending: LineEnding,
}

impl TemplateWriter {
    pub fn new(delimiter: Delimiter, line_ending: LineEnding) -> Self {
        Self {
            delimiter,
            line_ending,
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(output.delimiter, output.line_ending)
    }

    fn builder(&self) -> WriterBuilder {
        let terminator = match self.line_ending {
            LineEnding::Crlf => Terminator::CRLF,
            LineEnding::Lf => Terminator::Any(b'\n'),
        };
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter.as_byte())
            .terminator(terminator)
            .quote_style(QuoteStyle::Necessary);
        builder
    }

    /// 写出表头记录（cabecera）
    pub fn write_headers<W: Write>(&self, out: W, headers: &[DocumentHeader]) -> ExportResult<()> {
        let mut writer = self.builder().from_writer(out);
        writer.write_record(DocumentHeader::FIELD_NAMES)?;
        writer.write_record(DocumentHeader::DISPLAY_LABELS)?;
        for header in headers {
            writer.write_record(header.to_fields())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 写出明细记录（lineas）
    pub fn write_lines<W: Write>(&self, out: W, lines: &[DocumentLine]) -> ExportResult<()> {
        let mut writer = self.builder().from_writer(out);
        writer.write_record(DocumentLine::FIELD_NAMES)?;
        writer.write_record(DocumentLine::DISPLAY_LABELS)?;
        for line in lines {
            writer.write_record(line.to_fields())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 写出两个模板文件到输出目录（目录不存在时创建）
    pub fn write_bundle(
        &self,
        bundle: &TemplateBundle,
        out_dir: &Path,
        header_file: &str,
        lines_file: &str,
    ) -> ExportResult<WrittenFiles> {
        std::fs::create_dir_all(out_dir).map_err(|e| ExportError::OutputDirError {
            path: out_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let files = WrittenFiles {
            header_file: out_dir.join(header_file),
            lines_file: out_dir.join(lines_file),
        };

        self.write_headers(std::fs::File::create(&files.header_file)?, &bundle.headers)?;
        self.write_lines(std::fs::File::create(&files.lines_file)?, &bundle.lines)?;

        info!(
            header_file = %files.header_file.display(),
            lines_file = %files.lines_file.display(),
            delimiter = %self.delimiter,
            line_ending = %self.line_ending,
            "模板文件写出完成"
        );
        Ok(files)
    }
}
