//! Workbook Parser
//!
//! calamineを使用してワークブックの1シートを`Table`に読み込みます。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::error::ChartError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Table, COLUMN_COUNT};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// 形式（xlsx / xls / ods）はcalamineが自動判別します。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込み、セキュリティ上のサイズ上限を検証してから解析します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(ChartError::SecurityViolation)` - 入力がサイズ上限を超えた場合
    /// * `Err(ChartError::Parse)` - ワークブックとして解析できない場合
    pub fn open<R: Read + Seek>(mut reader: R) -> Result<Self, ChartError> {
        let security_config = SecurityConfig::default();

        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        security_config.check_input_size(bytes_read)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        debug!(bytes = bytes_read, "opened workbook");

        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシート名を決定
    ///
    /// # 戻り値
    ///
    /// * `Err(ChartError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, ChartError> {
        let all_sheet_names = self.sheet_names();

        match selector {
            SheetSelector::First => all_sheet_names
                .first()
                .cloned()
                .ok_or_else(|| ChartError::Config("Workbook contains no sheets".to_string())),

            SheetSelector::Index(index) => {
                all_sheet_names.get(*index).cloned().ok_or_else(|| {
                    ChartError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        all_sheet_names.len()
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(ChartError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// 選択したシートを`Table`として読み込む
    ///
    /// 先頭行をヘッダー行として扱い、完全に空の行は読み飛ばします。
    pub fn read_table(&mut self, selector: &SheetSelector) -> Result<Table, ChartError> {
        let sheet_name = self.select_sheet(selector)?;
        let range = self.workbook.worksheet_range(&sheet_name)?;
        let table = range_to_table(&range)?;
        debug!(
            sheet = %sheet_name,
            columns = table.width(),
            rows = table.len(),
            "read sheet"
        );
        Ok(table)
    }
}

/// calamineの範囲を`Table`に変換
fn range_to_table(range: &Range<Data>) -> Result<Table, ChartError> {
    let mut rows = range.rows();

    let header_row = rows.next().ok_or(ChartError::MalformedTable {
        expected: COLUMN_COUNT,
        actual: 0,
    })?;
    let headers = header_row
        .iter()
        .enumerate()
        .map(|(col_idx, cell)| header_name(col_idx, cell))
        .collect();

    let mut data_rows = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let values: Vec<CellValue> = row.iter().map(convert_cell).collect();
        if values.iter().all(CellValue::is_empty) {
            skipped += 1;
            continue;
        }
        data_rows.push(values);
    }

    if skipped > 0 {
        warn!(skipped, "skipped empty rows");
    }

    Ok(Table::new(headers, data_rows))
}

/// ヘッダーセルの列名
///
/// 空のヘッダーセルは`Unnamed: <列インデックス>`と命名します。
fn header_name(col_idx: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", col_idx),
        Data::String(s) if s.trim().is_empty() => format!("Unnamed: {}", col_idx),
        other => convert_cell(other).as_raw_string(),
    }
}

/// calamineのセルデータを`CellValue`に変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}
