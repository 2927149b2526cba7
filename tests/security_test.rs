//! Security Tests
//!
//! レコード名を経由したパストラバーサルを出力ファイル名・アーカイブのエントリ名が
//! 防いでいることを検証します。

use pcrchart::{bundle, clean_filename, write_charts, ChartRecord, ChartRendererBuilder, Metric};
use std::io::Cursor;
use zip::ZipArchive;

fn record(name: &str) -> ChartRecord {
    ChartRecord {
        name: name.to_string(),
        group1: (1..=4).map(|i| Metric::new(format!("A{}", i), 0.4)).collect(),
        group2: (1..=4).map(|i| Metric::new(format!("B{}", i), 0.8)).collect(),
    }
}

fn renderer() -> pcrchart::ChartRenderer {
    ChartRendererBuilder::new().with_size((320, 200)).build().unwrap()
}

/// パストラバーサル: レコード名に含まれる区切り文字は置換される
#[test]
fn test_path_traversal_in_record_name() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("charts");

    let paths = write_charts(&[record("../../escape")], &renderer(), &output_dir).unwrap();

    assert_eq!(paths, vec![output_dir.join("..-..-escape.png")]);
    assert!(paths[0].starts_with(&output_dir));
    assert!(!dir.path().join("escape.png").exists());
}

/// Windowsのドライブ指定・バックスラッシュも置換される
#[test]
fn test_windows_separators_in_record_name() {
    assert_eq!(clean_filename(r"C:\temp\x"), "C--temp-x");
    assert_eq!(clean_filename(r#"a"b<c>d|e?f*g"#), "a-b-c-d-e-f-g");
}

/// アーカイブのエントリ名にディレクトリ区切りが含まれない
#[test]
fn test_archive_entry_names_are_flat() {
    let records = [record("../up"), record("dir/sub/name"), record(r"back\slash")];
    let archive = bundle(&records, &renderer()).unwrap();

    let zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    let names: Vec<&str> = zip.file_names().collect();
    assert_eq!(names.len(), 3);
    for name in names {
        assert!(!name.contains('/'), "entry name {} contains a separator", name);
        assert!(!name.contains('\\'), "entry name {} contains a separator", name);
        assert!(name.ends_with(".png"));
    }
}
