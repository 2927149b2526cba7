//! ZIP Archive Bundler

use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::chart_file_name;
use crate::error::ChartError;
use crate::renderer::ChartRenderer;
use crate::types::ChartRecord;

/// 全レコードを描画し、1つのZIPアーカイブにまとめる
///
/// 各レコードはレコード名をタイトルとして描画され、`<無害化した名前>.png`という
/// エントリ名でdeflate圧縮して格納されます。1件でも描画に失敗した場合は
/// アーカイブ全体が失敗します。
///
/// # 戻り値
///
/// * `Ok(Vec<u8>)` - 完成したアーカイブのバイト列
///
/// # 使用例
///
/// ```rust,no_run
/// use pcrchart::{bundle, ChartRenderer};
///
/// # fn main() -> Result<(), pcrchart::ChartError> {
/// let records = Vec::new();
/// let archive = bundle(&records, &ChartRenderer::default())?;
/// std::fs::write("charts.zip", archive)?;
/// # Ok(())
/// # }
/// ```
pub fn bundle(records: &[ChartRecord], renderer: &ChartRenderer) -> Result<Vec<u8>, ChartError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut seen = HashSet::new();

    for record in records {
        let png = renderer.render_png(record, &record.name)?;
        let entry_name = chart_file_name(&record.name);

        if !seen.insert(entry_name.clone()) {
            warn!(entry = %entry_name, "duplicate archive entry name");
        }

        zip.start_file(entry_name.as_str(), options)?;
        zip.write_all(&png)?;
        debug!(entry = %entry_name, bytes = png.len(), "added chart to archive");
    }

    let archive = zip.finish()?.into_inner();
    info!(
        charts = records.len(),
        bytes = archive.len(),
        "bundled charts"
    );
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metric;
    use std::io::Read;
    use zip::ZipArchive;

    fn record(name: &str) -> ChartRecord {
        ChartRecord {
            name: name.to_string(),
            group1: (1..=4).map(|i| Metric::new(format!("A{}", i), 0.5)).collect(),
            group2: (1..=4).map(|i| Metric::new(format!("B{}", i), 1.5)).collect(),
        }
    }

    fn small_renderer() -> ChartRenderer {
        crate::builder::ChartRendererBuilder::new()
            .with_size((320, 200))
            .build()
            .unwrap()
    }

    #[test]
    fn test_bundle_entries() {
        let records = vec![record("Sample1"), record("A/B:C")];
        let archive = bundle(&records, &small_renderer()).unwrap();

        let mut zip = ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(zip.len(), 2);

        let names: Vec<String> = zip.file_names().map(str::to_string).collect();
        assert!(names.contains(&"Sample1.png".to_string()));
        assert!(names.contains(&"A-B-C.png".to_string()));

        let mut entry = zip.by_name("Sample1.png").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut png = Vec::new();
        entry.read_to_end(&mut png).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn test_bundle_empty() {
        let archive = bundle(&[], &small_renderer()).unwrap();
        let zip = ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(zip.len(), 0);
    }

    #[test]
    fn test_bundle_aborts_on_render_failure() {
        let mut bad = record("Bad");
        bad.group2[0].value = crate::types::CellValue::String("x".to_string());
        let result = bundle(&[record("Good"), bad], &small_renderer());
        assert!(matches!(result, Err(ChartError::Render(_))));
    }
}
