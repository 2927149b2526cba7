//! Integration Tests for pcrchart
//!
//! スプレッドシートの読み込みから、グラフの描画・ZIP/ディレクトリ出力までを通しで検証します。

use rust_xlsxwriter::*;
use std::io::{Cursor, Read};
use pcrchart::{
    bundle, has_required_columns, read_table, write_charts, CellValue, ChartError,
    ChartRendererBuilder, ClampPolicy, ReportBuilder, SheetSelector, TableExtractor,
    DEFAULT_REQUIRED_COLUMNS,
};
use zip::ZipArchive;

const SIMPLE_HEADERS: [&str; 9] = ["ID", "A1", "A2", "A3", "A4", "B1", "B2", "B3", "B4"];
const SCENARIO_VALUES: [f64; 8] = [0.5, 1.0, 2.5, 0.1, 0.0, 1.9, 3.0, 0.2];

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    fn write_row(
        worksheet: &mut Worksheet,
        row: u32,
        name: &str,
        values: &[f64],
    ) -> Result<(), XlsxError> {
        worksheet.write_string(row, 0, name)?;
        for (col, value) in values.iter().enumerate() {
            worksheet.write_number(row, col as u16 + 1, *value)?;
        }
        Ok(())
    }

    /// Generate a workbook with the given headers and (name, values) rows
    pub fn generate_table(headers: &[&str], rows: &[(&str, [f64; 8])]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }
        for (idx, (name, values)) in rows.iter().enumerate() {
            write_row(worksheet, idx as u32 + 1, name, values)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate the single-row scenario workbook
    pub fn generate_scenario() -> Result<Vec<u8>, XlsxError> {
        generate_table(&SIMPLE_HEADERS, &[("Sample1", SCENARIO_VALUES)])
    }

    /// Generate a PCR report layout: A1 left empty, default column names
    pub fn generate_pcr_report(samples: usize) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in DEFAULT_REQUIRED_COLUMNS.iter().enumerate().skip(1) {
            worksheet.write_string(0, col as u16, *header)?;
        }
        for idx in 0..samples {
            let values: Vec<f64> = (0..8).map(|i| (idx + i) as f64 * 0.3).collect();
            write_row(worksheet, idx as u32 + 1, &format!("Sample {}", idx + 1), &values)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a workbook with two sheets; only the second holds chart data
    pub fn generate_multi_sheets() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let notes = workbook.add_worksheet();
        notes.set_name("Notes")?;
        notes.write_string(0, 0, "Run notes")?;

        let results = workbook.add_worksheet();
        results.set_name("Results")?;
        for (col, header) in SIMPLE_HEADERS.iter().enumerate() {
            results.write_string(0, col as u16, *header)?;
        }
        write_row(results, 1, "Sample1", &SCENARIO_VALUES)?;

        Ok(workbook.save_to_buffer()?)
    }
}

fn small_renderer() -> pcrchart::ChartRenderer {
    ChartRendererBuilder::new().with_size((400, 240)).build().unwrap()
}

#[test]
fn test_read_table_scenario() {
    let excel_data = fixtures::generate_scenario().unwrap();
    let table = read_table(Cursor::new(excel_data), &SheetSelector::First).unwrap();

    assert_eq!(table.headers, SIMPLE_HEADERS);
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0][0], CellValue::String("Sample1".to_string()));
    assert_eq!(table.rows[0][3], CellValue::Number(2.5));
}

#[test]
fn test_scenario_end_to_end() {
    let excel_data = fixtures::generate_scenario().unwrap();
    let table = read_table(Cursor::new(excel_data), &SheetSelector::First).unwrap();
    assert!(has_required_columns(&table, &SIMPLE_HEADERS));

    let records = TableExtractor::new().extract(&table).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Sample1");

    let chart = ChartRendererBuilder::new()
        .build()
        .unwrap()
        .render(&records[0], &records[0].name)
        .unwrap();
    assert_eq!(
        chart.layout().heights(),
        vec![0.5, 1.0, 2.0, 0.1, 0.0, 1.9, 2.0, 0.2]
    );
    assert_eq!(chart.layout().overflow_indices(), vec![2, 6]);
}

#[test]
fn test_report_missing_column_produces_no_charts() {
    let mut headers = SIMPLE_HEADERS;
    headers[6] = "B2 (old)";
    let excel_data = fixtures::generate_table(&headers, &[("Sample1", SCENARIO_VALUES)]).unwrap();

    let report = ReportBuilder::new()
        .with_required_columns(SIMPLE_HEADERS)
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("charts");

    let result = report.write_charts(Cursor::new(excel_data), &output_dir);
    let err = result.unwrap_err();
    assert!(err.is_table_error());
    assert_eq!(
        err.user_message(),
        "The spreadsheet does not contain the required columns."
    );
    match err {
        ChartError::MissingColumns { missing } => {
            assert_eq!(missing, vec!["B2".to_string()]);
        }
        other => panic!("Expected MissingColumns, got {:?}", other),
    }
    assert!(!output_dir.exists());
}

#[test]
fn test_report_bundle_pcr_layout() {
    let excel_data = fixtures::generate_pcr_report(3).unwrap();
    let report = ReportBuilder::new().with_size((400, 240)).build().unwrap();

    let archive = report.bundle(Cursor::new(excel_data)).unwrap();
    let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    assert_eq!(zip.len(), 3);

    for idx in 1..=3 {
        let mut entry = zip.by_name(&format!("Sample {}.png", idx)).unwrap();
        let mut png = Vec::new();
        entry.read_to_end(&mut png).unwrap();

        let decoded = ::image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 400);
        assert_eq!(decoded.height(), 240);
    }
}

#[test]
fn test_report_load_records_unnamed_first_column() {
    let excel_data = fixtures::generate_pcr_report(2).unwrap();
    let report = ReportBuilder::new().build().unwrap();

    let records = report.load_records(Cursor::new(excel_data)).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Sample 1");
    assert_eq!(records[0].group1[0].label, "P+FGF P1 N.");
    assert_eq!(records[1].group2[3].label, "P+PL P3 I.");
}

#[test]
fn test_report_write_charts() {
    let excel_data = fixtures::generate_table(
        &SIMPLE_HEADERS,
        &[("Sample1", SCENARIO_VALUES), ("A/B:C", SCENARIO_VALUES)],
    )
    .unwrap();
    let report = ReportBuilder::new()
        .with_required_columns(SIMPLE_HEADERS)
        .with_size((400, 240))
        .build()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("charts");
    let paths = report
        .write_charts(Cursor::new(excel_data), &output_dir)
        .unwrap();

    assert_eq!(
        paths,
        vec![output_dir.join("Sample1.png"), output_dir.join("A-B-C.png")]
    );
    for path in &paths {
        let decoded = ::image::open(path).unwrap();
        assert_eq!(decoded.width(), 400);
    }
}

#[test]
fn test_sheet_selector_by_name_and_index() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();

    let by_name = read_table(
        Cursor::new(excel_data.clone()),
        &SheetSelector::Name("Results".to_string()),
    )
    .unwrap();
    let by_index = read_table(Cursor::new(excel_data.clone()), &SheetSelector::Index(1)).unwrap();
    assert_eq!(by_name, by_index);
    assert_eq!(by_name.width(), 9);

    let first = read_table(Cursor::new(excel_data), &SheetSelector::First).unwrap();
    assert_eq!(first.headers, vec!["Run notes".to_string()]);
}

#[test]
fn test_unknown_sheet_is_config_error() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let result = read_table(
        Cursor::new(excel_data),
        &SheetSelector::Name("Missing".to_string()),
    );
    match result {
        Err(ChartError::Config(msg)) => assert!(msg.contains("Missing")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_bundle_unclamped() {
    let excel_data = fixtures::generate_scenario().unwrap();
    let table = read_table(Cursor::new(excel_data), &SheetSelector::First).unwrap();
    let records = TableExtractor::new().extract(&table).unwrap();

    let renderer = ChartRendererBuilder::new()
        .with_size((400, 240))
        .with_clamp_policy(ClampPolicy::Unclamped)
        .build()
        .unwrap();
    let archive = bundle(&records, &renderer).unwrap();
    let zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    assert_eq!(zip.len(), 1);
}

#[test]
fn test_write_charts_overwrites() {
    let excel_data = fixtures::generate_scenario().unwrap();
    let table = read_table(Cursor::new(excel_data), &SheetSelector::First).unwrap();
    let records = TableExtractor::new().extract(&table).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let renderer = small_renderer();
    let first = write_charts(&records, &renderer, dir.path()).unwrap();
    let second = write_charts(&records, &renderer, dir.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
