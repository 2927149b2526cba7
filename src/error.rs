//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// 必須列が欠けている場合などに利用者へ表示する単一メッセージ
pub const TABLE_ERROR_MESSAGE: &str = "The spreadsheet does not contain the required columns.";

/// pcrchartクレート全体で使用するエラー型
///
/// Excelファイルの読み込み、表の検証、グラフ描画、出力処理中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み・書き込み失敗など）
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `MissingColumns` / `MalformedTable` / `MalformedRow`: 表の形式エラー
/// - `Render`: 数値でないセル値や描画バックエンドの失敗
///
/// # 使用例
///
/// ```rust,no_run
/// use pcrchart::ChartError;
/// use std::fs::File;
///
/// fn open_report(path: &str) -> Result<(), ChartError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ChartError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// ZIPアーカイブの書き込みエラー
    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// PNGエンコードのエラー
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// 設定の検証に失敗したエラー
    ///
    /// `build()`時に設定を検証し、無効な設定が検出された場合、
    /// または存在しないシートが指定された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use pcrchart::{ChartError, ChartRendererBuilder};
    ///
    /// let result = ChartRendererBuilder::new()
    ///     .with_size((0, 600))  // 無効なサイズ
    ///     .build();
    ///
    /// match result {
    ///     Err(ChartError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー（入力ファイルサイズの上限超過）
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// 必須列がヘッダー行に存在しない
    ///
    /// 欠けている列名を要求順に保持します。このエラーの場合、グラフは1枚も生成されません。
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// 欠けている列名
        missing: Vec<String>,
    },

    /// 表の列数が期待値と異なる
    #[error("Malformed table: expected {expected} columns, found {actual}")]
    MalformedTable {
        /// 期待される列数
        expected: usize,
        /// 実際の列数
        actual: usize,
    },

    /// データ行の列数がヘッダー行と一致しない
    #[error("Malformed row {row}: expected {expected} cells, found {actual}")]
    MalformedRow {
        /// スプレッドシート上の行番号（1始まり、ヘッダーが1行目）
        row: usize,
        /// 期待されるセル数
        expected: usize,
        /// 実際のセル数
        actual: usize,
    },

    /// グラフ描画の失敗
    ///
    /// 数値でない値、有限でない値、描画バックエンドのエラーなど。
    #[error("Render error: {0}")]
    Render(String),
}

impl ChartError {
    /// 表の形式に関するエラーかどうか
    ///
    /// `MissingColumns`、`MalformedTable`、`MalformedRow`は利用者から見て同じ分類として扱う。
    pub fn is_table_error(&self) -> bool {
        matches!(
            self,
            ChartError::MissingColumns { .. }
                | ChartError::MalformedTable { .. }
                | ChartError::MalformedRow { .. }
        )
    }

    /// 利用者向けのメッセージを返す
    pub fn user_message(&self) -> String {
        if self.is_table_error() {
            TABLE_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}
