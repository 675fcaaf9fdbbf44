// ==========================================
// 出库单转换工具 - 分组引擎集成测试
// ==========================================
// 覆盖: 单据编号连续性 / 明细编号连续性 / 区域携带 / 噪声过滤 / 幂等性
// ==========================================


use salida_almacen::config::ConvertConfig;
use salida_almacen::domain::{CellValue, SheetGrid};
use salida_almacen::engine::{ConversionOutcome, Converter};
use std::collections::HashSet;
use test_helpers::sheet;

fn converter() -> Converter {
    salida_almacen::logging::init_test();
    Converter::new(ConvertConfig::default())
        .unwrap()
        .with_run_date("20261018")
        .unwrap()
}

/// 多区域、多技术员、混有噪声与标题的报表
fn mixed_report() -> Vec<SheetGrid> {
    vec![
        sheet(
            "Hoja1",
            &[
                &["SALIDAS DE ALMACEN", "", "", "", "", "", ""],
                &["Nombre", "Area", "Division", "Número de artículo", "", "Cantidad", "Comentarios"],
                &["FO ZONA NORTE 05/03/2024", "", "", "", "", "", ""],
                &["Juan Perez", "", "METRO", "4500123.0", "", "5", "Revisado 05/03/2024 ok"],
                &["", "", "", "4500124.0", "", "2", ""],
                &["Ana Ruiz", "", "", "4500200", "", "x", "sin fecha"],
                &["Contratista: Telcel", "", "", "999", "", "1", ""],
                &["FO ZONA SUR", "", "", "", "", "", ""],
                &["Juan Perez", "", "METRO", "4500125", "", "1", ""],
            ],
        ),
        sheet(
            "Hoja2",
            &[
                &["COBRE ZONA NORTE", "", "", "", "", "", ""],
                &["Juan Perez", "", "", "4600001.0", "", "3", ""],
                &["Pedro Lopez", "Xalapa", "FORANEO", "4600002", "", "4", "01/01/2025"],
                &["", "", "", "4600003", "", "6", ""],
            ],
        ),
    ]
}

fn bundle_of(outcome: &ConversionOutcome) -> &salida_almacen::TemplateBundle {
    outcome.bundle().expect("期望生成单据")
}

#[test]
fn test_doc_nums_contiguous_in_first_seen_order() {
    let outcome = converter().convert_sheets(&mixed_report());
    let bundle = bundle_of(&outcome);

    let keys: Vec<(String, String)> = bundle
        .headers
        .iter()
        .map(|h| (h.contractor.clone(), h.area.clone()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Juan Perez".to_string(), "ZONA NORTE".to_string()),
            ("Ana Ruiz".to_string(), "ZONA NORTE".to_string()),
            ("Juan Perez".to_string(), "ZONA SUR".to_string()),
            ("Pedro Lopez".to_string(), "Xalapa".to_string()),
        ]
    );

    let distinct: HashSet<_> = keys.iter().collect();
    let doc_nums: Vec<u32> = bundle.headers.iter().map(|h| h.doc_num).collect();
    assert_eq!(doc_nums, (1..=distinct.len() as u32).collect::<Vec<_>>());
}

#[test]
fn test_line_nums_contiguous_per_document() {
    let outcome = converter().convert_sheets(&mixed_report());
    let bundle = bundle_of(&outcome);

    for header in &bundle.headers {
        let line_nums: Vec<u32> = bundle.lines_of(header.doc_num).map(|l| l.line_num).collect();
        assert_eq!(line_nums, (0..line_nums.len() as u32).collect::<Vec<_>>());
    }

    // Juan Perez / ZONA NORTE 跨两个工作表累积 3 行，顺序不变
    let juan_norte: Vec<&str> = bundle.lines_of(1).map(|l| l.item_code.as_str()).collect();
    assert_eq!(juan_norte, vec!["4500123", "4500124", "4600001"]);
}

#[test]
fn test_area_carries_forward_and_explicit_area_sticks() {
    let outcome = converter().convert_sheets(&mixed_report());
    let bundle = bundle_of(&outcome);

    // Pedro 行声明 Xalapa，下一行无技术员无区域 → 继承 Pedro / Xalapa
    let pedro: Vec<(&str, &str)> = bundle
        .lines_of(4)
        .map(|l| (l.item_code.as_str(), l.area.as_str()))
        .collect();
    assert_eq!(pedro, vec![("4600002", "Xalapa"), ("4600003", "Xalapa")]);
    assert_eq!(bundle.headers[3].division, "FORANEO");
    assert_eq!(bundle.headers[3].doc_date, "20250101");
}

#[test]
fn test_header_fields_and_date_fallback() {
    let outcome = converter().convert_sheets(&mixed_report());
    let bundle = bundle_of(&outcome);

    let juan = &bundle.headers[0];
    assert_eq!(juan.doc_date, "20240305");
    assert_eq!(juan.comments, "Revisado 05/03/2024 ok");
    assert_eq!(juan.division, "METRO");

    let ana = &bundle.headers[1];
    assert_eq!(ana.doc_date, "20261018");
    assert_eq!(ana.division, "METRO");

    // 数量无法解析 → 0
    let ana_line = bundle.lines_of(2).next().unwrap();
    assert_eq!(ana_line.quantity, 0.0);
}

#[test]
fn test_report_counts() {
    let outcome = converter().convert_sheets(&mixed_report());
    let report = outcome.report();

    assert_eq!(report.rows_scanned, 13);
    assert_eq!(report.noise_rows, 2);
    assert_eq!(report.section_headers, 3);
    assert_eq!(report.skipped_non_material, 1);
    assert_eq!(report.material_lines, 7);
    assert_eq!(report.area_declarations, 1);
    assert_eq!(report.quantity_defaulted, 1);
    assert_eq!(report.dropped_missing_technician, 0);
    assert_eq!(report.documents, 4);
    assert_eq!(report.document_lines, 7);
}

#[test]
fn test_noise_row_produces_no_group_and_no_state_change() {
    let sheets = vec![sheet(
        "Hoja1",
        &[
            &["Contratista: Juan", "NORTE", "", "4500123", "", "5", ""],
            &["", "", "", "4500124", "", "1", ""],
        ],
    )];

    let outcome = converter().convert_sheets(&sheets);

    // 噪声行未设置技术员，第二行因此被丢弃
    assert!(outcome.is_empty());
    assert_eq!(outcome.report().noise_rows, 1);
    assert_eq!(outcome.report().dropped_missing_technician, 1);
}

#[test]
fn test_idempotent_with_fixed_run_date() {
    let first = converter().convert_sheets(&mixed_report());
    let second = converter().convert_sheets(&mixed_report());

    assert_eq!(first.bundle(), second.bundle());
    assert_ne!(first.report().run_id, second.report().run_id);
}

#[test]
fn test_reference_scenario() {
    let sheets = vec![SheetGrid::new(
        "Hoja1",
        vec![
            vec![CellValue::from("COBRE ZONA NORTE")],
            vec![
                CellValue::from("Juan Perez"),
                CellValue::Empty,
                CellValue::from("METRO"),
                CellValue::from("4500123.0"),
                CellValue::Empty,
                CellValue::from("5"),
                CellValue::from("entregado 01/02/2024"),
            ],
        ],
    )];

    let outcome = converter().convert_sheets(&sheets);
    let bundle = bundle_of(&outcome);

    assert_eq!(bundle.headers.len(), 1);
    let header = &bundle.headers[0];
    assert_eq!(header.doc_num, 1);
    assert_eq!(header.doc_date, "20240201");
    assert_eq!(header.area, "ZONA NORTE");
    assert_eq!(header.contractor, "Juan Perez");

    assert_eq!(bundle.lines.len(), 1);
    let line = &bundle.lines[0];
    assert_eq!(line.item_code, "4500123");
    assert_eq!(line.quantity, 5.0);
    assert_eq!(line.line_num, 0);
    assert_eq!(line.parent_key, 1);
}
