//! Directory Writer

use std::path::{Path, PathBuf};
use tracing::info;

use super::chart_file_name;
use crate::error::ChartError;
use crate::renderer::ChartRenderer;
use crate::types::ChartRecord;

/// 全レコードを描画し、`output_dir`にPNGファイルとして保存する
///
/// ディレクトリが存在しない場合は作成され、同名のファイルは上書きされます。
///
/// # 戻り値
///
/// * `Ok(Vec<PathBuf>)` - 書き込んだファイルのパス（レコード順）
pub fn write_charts(
    records: &[ChartRecord],
    renderer: &ChartRenderer,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ChartError> {
    let paths = records
        .iter()
        .map(|record| {
            renderer.save(
                record,
                &record.name,
                output_dir,
                &chart_file_name(&record.name),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        charts = paths.len(),
        dir = %output_dir.display(),
        "wrote charts"
    );
    Ok(paths)
}
