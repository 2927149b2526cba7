//! Table Extractor
//!
//! `Table`の各データ行を`ChartRecord`に変換するモジュール。

use tracing::info;

use crate::error::ChartError;
use crate::types::{CellValue, ChartRecord, Metric, Table, COLUMN_COUNT, GROUP_SIZE};

/// PCRレポートで要求される列名
///
/// 1列目は見出しが空のため`Unnamed: 0`となります。
pub const DEFAULT_REQUIRED_COLUMNS: [&str; COLUMN_COUNT] = [
    "Unnamed: 0",
    "P+FGF P1 N.",
    "P+FGF P1 I.",
    "P+PL P1 N.",
    "P+PL P1 I.",
    "P+FGF P3 N.",
    "P+FGF P3 I.",
    "P+PL P3 N.",
    "P+PL P3 I.",
];

/// 識別子セルが空の行に付ける名前
///
/// 空の名前では出力ファイルが`.png`（隠しファイル）になるため、固定の名前に置き換えます。
pub const EMPTY_NAME_PLACEHOLDER: &str = "nan";

/// 必須列がすべて存在するかを判定する
///
/// 列の順序は問いません。`extract`の前に呼び出して検証してください。
///
/// # 使用例
///
/// ```rust
/// use pcrchart::{has_required_columns, Table};
///
/// let table = Table::new(vec!["ID".into(), "A1".into()], vec![]);
/// assert!(has_required_columns(&table, &["A1", "ID"]));
/// assert!(!has_required_columns(&table, &["ID", "B1"]));
/// ```
pub fn has_required_columns<S: AsRef<str>>(table: &Table, required: &[S]) -> bool {
    TableExtractor::missing_columns(table, required).is_empty()
}

/// 表からグラフデータを抽出する
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor;

impl TableExtractor {
    pub fn new() -> Self {
        Self
    }

    /// ヘッダー行に存在しない必須列を要求順に返す
    pub fn missing_columns<S: AsRef<str>>(table: &Table, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !table.headers.iter().any(|header| header.as_str() == *name))
            .map(str::to_string)
            .collect()
    }

    /// 必須列を検証し、欠けていれば`MissingColumns`エラーを返す
    pub fn validate<S: AsRef<str>>(table: &Table, required: &[S]) -> Result<(), ChartError> {
        let missing = Self::missing_columns(table, required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ChartError::MissingColumns { missing })
        }
    }

    /// 各データ行から`ChartRecord`を生成する
    ///
    /// 1列目を名前、2〜5列目を`group1`、6〜9列目を`group2`とし、
    /// それぞれ列見出しをラベルとして組にします。値は読み込んだまま保持します。
    ///
    /// # 戻り値
    ///
    /// * `Err(ChartError::MalformedTable)` - 列数が9でない場合
    /// * `Err(ChartError::MalformedRow)` - データ行の幅がヘッダー行と異なる場合
    pub fn extract(&self, table: &Table) -> Result<Vec<ChartRecord>, ChartError> {
        if table.width() != COLUMN_COUNT {
            return Err(ChartError::MalformedTable {
                expected: COLUMN_COUNT,
                actual: table.width(),
            });
        }

        let labels1 = &table.headers[1..1 + GROUP_SIZE];
        let labels2 = &table.headers[1 + GROUP_SIZE..COLUMN_COUNT];

        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                if row.len() != COLUMN_COUNT {
                    return Err(ChartError::MalformedRow {
                        // ヘッダーが1行目のため、データ行は2行目から
                        row: row_idx + 2,
                        expected: COLUMN_COUNT,
                        actual: row.len(),
                    });
                }

                Ok(ChartRecord {
                    name: record_name(&row[0]),
                    group1: zip_metrics(labels1, &row[1..1 + GROUP_SIZE]),
                    group2: zip_metrics(labels2, &row[1 + GROUP_SIZE..]),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(records = records.len(), "extracted chart records");
        Ok(records)
    }
}

fn record_name(cell: &CellValue) -> String {
    let name = cell.as_raw_string();
    if name.trim().is_empty() {
        EMPTY_NAME_PLACEHOLDER.to_string()
    } else {
        name
    }
}

fn zip_metrics(labels: &[String], values: &[CellValue]) -> Vec<Metric> {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| Metric {
            label: label.clone(),
            value: value.clone(),
        })
        .collect()
}
