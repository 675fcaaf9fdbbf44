// ==========================================
// 出库单转换工具 - 命令行测试
// ==========================================
// 覆盖: 参数覆写配置 / 环境变量配置 / 空结果退出码 / 非法运行日期
// ==========================================


use std::path::Path;
use std::process::{Command, Output};
use test_helpers::read_template;

const REPORT_CSV: &str = "COBRE ZONA NORTE,,,,,,\nJuan Perez,,METRO,4500123.0,,5,entregado 01/02/2024\n,,,4500124,,2,\n";

/// 隔离运行环境：不读取用户配置目录与外部环境变量
fn run(args: &[&str], home: &Path, config_env: Option<&Path>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_salida-almacen"));
    cmd.args(args)
        .env_remove("SALIDA_ALMACEN_CONFIG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("RUST_LOG", "warn");
    if let Some(path) = config_env {
        cmd.env("SALIDA_ALMACEN_CONFIG", path);
    }
    cmd.output().expect("启动命令行失败")
}

#[test]
fn test_cli_flags_override_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("reporte.csv");
    std::fs::write(&input, REPORT_CSV).unwrap();
    let out_dir = temp_dir.path().join("salida");

    let output = run(
        &[
            input.to_str().unwrap(),
            "-o",
            out_dir.to_str().unwrap(),
            "--delimiter",
            "semicolon",
            "--line-ending",
            "lf",
            "--run-date",
            "20261018",
            "--report",
        ],
        temp_dir.path(),
        None,
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["documents"], 1);
    assert_eq!(report["document_lines"], 2);
    assert_eq!(report["run_date"], "20261018");

    let header_file = out_dir.join("Salida_Almacen_Cabecera.txt");
    let raw = std::fs::read_to_string(&header_file).unwrap();
    assert!(!raw.contains('\r'));
    let headers = read_template(&header_file, ';', "\n");
    assert_eq!(headers[2][2], "20240201");
    assert_eq!(headers[2][4], "ZONA NORTE");

    let lines = read_template(&out_dir.join("Salida_Almacen_Lineas.txt"), ';', "\n");
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3][2], "4500124");
}

#[test]
fn test_cli_reads_config_from_env_var() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("reporte.csv");
    std::fs::write(&input, REPORT_CSV).unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "output": { "lines_file": "lineas.txt" } }"#).unwrap();

    let output = run(
        &[input.to_str().unwrap(), "-o", temp_dir.path().to_str().unwrap()],
        temp_dir.path(),
        Some(&config_path),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(temp_dir.path().join("lineas.txt").exists());

    // 默认仍为 tab + CRLF
    let lines = read_template(&temp_dir.path().join("lineas.txt"), '\t', "\r\n");
    assert_eq!(lines[2][0], "1");
}

#[test]
fn test_cli_empty_result_exits_zero_without_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("vacio.csv");
    std::fs::write(&input, "SALIDAS DE ALMACEN,,,,,,\nFO ZONA SUR,,,,,,\n").unwrap();
    let out_dir = temp_dir.path().join("salida");

    let output = run(
        &[input.to_str().unwrap(), "-o", out_dir.to_str().unwrap()],
        temp_dir.path(),
        None,
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(!out_dir.exists());
}

#[test]
fn test_cli_rejects_invalid_run_date() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("reporte.csv");
    std::fs::write(&input, REPORT_CSV).unwrap();

    let output = run(
        &[
            input.to_str().unwrap(),
            "-o",
            temp_dir.path().to_str().unwrap(),
            "--run-date",
            "20241340",
        ],
        temp_dir.path(),
        None,
    );

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("Salida_Almacen_Cabecera.txt").exists());
}
