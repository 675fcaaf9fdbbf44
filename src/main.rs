// ==========================================
// 出库单转换工具 - 命令行入口
// ==========================================
// 流程: 加载配置 → 读取报表 → 转换 → 写出模板 → (可选) 打印报告
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use salida_almacen::config::{ConvertConfig, Delimiter, LineEnding, MissingTechnicianPolicy};
use salida_almacen::engine::{ConversionOutcome, Converter};
use salida_almacen::importer::UniversalFileParser;
use salida_almacen::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salida-almacen")]
#[command(about = "技术员领料报表 → SAP 出库单导入模板（表头 + 明细）")]
#[command(long_about = "将技术员领料报表（前两个工作表）转换为 SAP 出库单导入模板。

输出:
  Salida_Almacen_Cabecera.txt  单据表头（每个 技术员+区域 一张单据）
  Salida_Almacen_Lineas.txt    单据明细

示例:
  salida-almacen reporte.xlsx
  salida-almacen reporte.xlsx -o salida/ --delimiter semicolon --line-ending lf
  salida-almacen reporte.xlsx --run-date 20240301 --report")]
#[command(version)]
struct Cli {
    /// 报表文件（.xlsx/.xlsm/.xls/.xlsb/.ods/.csv）
    input: PathBuf,

    /// 输出目录
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// 配置文件（JSON）；未指定时依次查找 SALIDA_ALMACEN_CONFIG、用户配置目录
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 分隔符: tab / semicolon
    #[arg(long)]
    delimiter: Option<Delimiter>,

    /// 换行符: crlf / lf
    #[arg(long)]
    line_ending: Option<LineEnding>,

    /// 固定运行日期（YYYYMMDD），备注中无日期的单据使用该日期
    #[arg(long)]
    run_date: Option<String>,

    /// 无技术员的物料行不输出 warn 日志（仍计入报告）
    #[arg(long)]
    quiet_dropped: bool,

    /// 将转换报告以 JSON 打印到 stdout
    #[arg(long)]
    report: bool,

    /// 输出 debug 级别日志
    #[arg(short, long)]
    verbose: bool,

    /// JSON 格式日志
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "info" }, cli.log_json);

    tracing::info!("{} v{}", salida_almacen::APP_NAME, salida_almacen::VERSION);

    // 配置：文件 → 命令行覆写
    let mut config = ConvertConfig::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(delimiter) = cli.delimiter {
        config.output.delimiter = delimiter;
    }
    if let Some(line_ending) = cli.line_ending {
        config.output.line_ending = line_ending;
    }
    if cli.quiet_dropped {
        config.missing_technician = MissingTechnicianPolicy::Silent;
    }

    let mut converter = Converter::new(config).context("初始化转换器失败")?;
    if let Some(run_date) = cli.run_date.as_deref() {
        converter = converter.with_run_date(run_date)?;
    }

    let (outcome, written) = converter
        .convert_file_to_dir(&UniversalFileParser, &cli.input, &cli.out_dir)
        .with_context(|| format!("转换失败: {}", cli.input.display()))?;

    match (&outcome, &written) {
        (ConversionOutcome::Converted { report, .. }, Some(files)) => {
            tracing::info!(
                documents = report.documents,
                header_file = %files.header_file.display(),
                lines_file = %files.lines_file.display(),
                "成功生成 {} 张单据",
                report.documents
            );
        }
        _ => {
            tracing::warn!("报表中没有可转换的物料行，未生成模板文件");
        }
    }

    if cli.report {
        let json = serde_json::to_string_pretty(outcome.report()).context("报告序列化失败")?;
        println!("{}", json);
    }

    Ok(())
}
