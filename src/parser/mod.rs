//! Parser Module
//!
//! calamineを使用したExcelファイル解析。
//! 1シートをヘッダー行とデータ行からなる`Table`として読み込みます。

mod workbook;

use std::io::{Read, Seek};

use crate::api::SheetSelector;
use crate::error::ChartError;
use crate::types::Table;

pub(crate) use workbook::WorkbookParser;

/// ワークブックを開き、選択したシートを`Table`として読み込む
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use pcrchart::{read_table, SheetSelector};
///
/// # fn main() -> Result<(), pcrchart::ChartError> {
/// let table = read_table(File::open("data.xlsx")?, &SheetSelector::First)?;
/// println!("{} rows", table.len());
/// # Ok(())
/// # }
/// ```
pub fn read_table<R: Read + Seek>(
    reader: R,
    selector: &SheetSelector,
) -> Result<Table, ChartError> {
    let mut parser = WorkbookParser::open(reader)?;
    parser.read_table(selector)
}
