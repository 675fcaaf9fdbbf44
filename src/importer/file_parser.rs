// ==========================================
// 出库单转换工具 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解码 → 工作表网格
// 支持: Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) / CSV (.csv，单工作表)
// 说明: 不假设表头行，第 0 行即数据；列按绝对位置保留（A 列永远是下标 0）
// ==========================================

use crate::domain::types::{CellValue, SheetGrid};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// WorkbookReader Trait
// ==========================================
// 用途: 外部解码协作者接口
// 实现者: ExcelParser, CsvParser, UniversalFileParser
pub trait WorkbookReader: Send + Sync {
    /// 读取前 max_sheets 个工作表
    ///
    /// # 返回
    /// - Ok(Vec<SheetGrid>): 按工作表顺序排列的网格
    /// - Err: 文件不存在 / 格式不支持 / 解码失败
    fn read_sheets(&self, file_path: &Path, max_sheets: usize) -> ImportResult<Vec<SheetGrid>>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    fn convert_field(value: &str) -> CellValue {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl WorkbookReader for CsvParser {
    fn read_sheets(&self, file_path: &Path, _max_sheets: usize) -> ImportResult<Vec<SheetGrid>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(Self::convert_field).collect());
        }

        let name = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        debug!(sheet = %name, rows = rows.len(), "CSV 读取完成");

        Ok(vec![SheetGrid::new(name, rows)])
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// calamine 单元格 → 领域单元格
    pub fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => dt
                .as_datetime()
                .map(CellValue::DateTime)
                .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            // 公式错误 (#N/A, #DIV/0! ...) 按空值处理
            Data::Error(_) => CellValue::Empty,
        }
    }

    /// 将 Range 展开为绝对坐标网格
    ///
    /// calamine 的 Range 从第一个非空单元格开始，这里补齐左侧空列，
    /// 保证 A 列始终位于下标 0；顶部空行本身为空白行，直接略过。
    fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
        let (Some((start_row, _)), Some((end_row, end_col))) = (range.start(), range.end()) else {
            return Vec::new();
        };

        (start_row..=end_row)
            .map(|row| {
                (0..=end_col)
                    .map(|col| {
                        range
                            .get_value((row, col))
                            .map(Self::convert_cell)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }
}

impl WorkbookReader for ExcelParser {
    fn read_sheets(&self, file_path: &Path, max_sheets: usize) -> ImportResult<Vec<SheetGrid>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !matches!(ext.as_str(), "xlsx" | "xlsm" | "xls" | "xlsb" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿（按扩展名自动选择格式）
        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::NoWorksheets(file_path.display().to_string()));
        }

        let mut sheets = Vec::new();
        for name in sheet_names.into_iter().take(max_sheets) {
            let range = workbook.worksheet_range(&name)?;
            let rows = Self::range_to_rows(&range);
            debug!(sheet = %name, rows = rows.len(), "工作表读取完成");
            sheets.push(SheetGrid::new(name, rows));
        }

        Ok(sheets)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl WorkbookReader for UniversalFileParser {
    fn read_sheets(&self, file_path: &Path, max_sheets: usize) -> ImportResult<Vec<SheetGrid>> {
        let ext = extension_of(file_path);
        info!(file_path = %file_path.display(), format = %ext, "开始读取报表文件");

        match ext.as_str() {
            "csv" => CsvParser.read_sheets(file_path, max_sheets),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => {
                ExcelParser.read_sheets(file_path, max_sheets)
            }
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_reads_first_row_as_data() {
        let temp_file = csv_file(&["COBRE ZONA NORTE,,,,,,", "Juan Perez,,METRO,4500123,,5,ok"]);

        let sheets = CsvParser.read_sheets(temp_file.path(), 2).unwrap();

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].rows.len(), 2);
        assert_eq!(sheets[0].rows[0][0], CellValue::from("COBRE ZONA NORTE"));
        assert_eq!(sheets[0].rows[0][1], CellValue::Empty);
        assert_eq!(sheets[0].rows[1][3], CellValue::from("4500123"));
    }

    #[test]
    fn test_csv_parser_allows_ragged_rows() {
        let temp_file = csv_file(&["a", "a,b,c,d,e,f,g,h"]);

        let sheets = CsvParser.read_sheets(temp_file.path(), 2).unwrap();

        assert_eq!(sheets[0].rows[0].len(), 1);
        assert_eq!(sheets[0].rows[1].len(), 8);
    }

    #[test]
    fn test_file_not_found() {
        let result = UniversalFileParser.read_sheets(Path::new("non_existent.xlsx"), 2);
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_file = NamedTempFile::new().unwrap();
        let result = UniversalFileParser.read_sheets(temp_file.path(), 2);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_corrupt_workbook_is_fatal() {
        let mut temp_file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(temp_file, "definitely not a zip archive").unwrap();

        let result = UniversalFileParser.read_sheets(temp_file.path(), 2);
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_convert_cell() {
        assert_eq!(ExcelParser::convert_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            ExcelParser::convert_cell(&Data::String("x".to_string())),
            CellValue::from("x")
        );
        assert_eq!(ExcelParser::convert_cell(&Data::Empty), CellValue::Empty);
    }
}
