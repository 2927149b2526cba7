//! Security Module
//!
//! 入力サイズの制限と、ファイル名・アーカイブエントリ名の無害化を提供するモジュール。

use crate::error::ChartError;

/// ファイル名として使用できない文字
const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 読み込んだ入力サイズが上限内かを検証
    pub fn check_input_size(&self, bytes_read: usize) -> Result<(), ChartError> {
        if bytes_read as u64 > self.max_input_file_size {
            return Err(ChartError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, self.max_input_file_size
            )));
        }
        Ok(())
    }
}

/// ファイル名に使用できない文字を`-`に置換する
///
/// `\ / * ? : " < > |` の各文字を置換します。結果にはこれらの文字が含まれないため、
/// 2回適用しても結果は変わりません。
///
/// # 使用例
///
/// ```rust
/// use pcrchart::clean_filename;
///
/// assert_eq!(clean_filename("A/B:C"), "A-B-C");
/// ```
pub fn clean_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if FORBIDDEN_FILENAME_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect()
}
