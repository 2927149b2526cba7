//! Output Module
//!
//! 描画したグラフをZIPアーカイブまたはディレクトリに書き出すモジュール。

mod archive;
mod directory;

pub use archive::bundle;
pub use directory::write_charts;

use crate::security::clean_filename;

/// ファイル出力の既定ディレクトリ名
pub const DEFAULT_OUTPUT_DIR: &str = "charts";

/// レコード名から出力ファイル名（`<無害化した名前>.png`）を生成
pub(crate) fn chart_file_name(record_name: &str) -> String {
    format!("{}.png", clean_filename(record_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_file_name() {
        assert_eq!(chart_file_name("Sample1"), "Sample1.png");
        assert_eq!(chart_file_name("A/B:C"), "A-B-C.png");
        assert_eq!(chart_file_name(""), ".png");
    }
}
