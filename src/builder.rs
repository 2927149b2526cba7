//! Builder Module
//!
//! Fluent Builder APIを提供し、`ChartRenderer`と`Report`を段階的に構築する。

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::api::{ClampPolicy, SheetSelector};
use crate::error::ChartError;
use crate::extractor::{TableExtractor, DEFAULT_REQUIRED_COLUMNS};
use crate::renderer::ChartRenderer;
use crate::types::ChartRecord;

/// 1辺あたりの最大ピクセル数
const MAX_DIMENSION: u32 = 8192;

/// 軸・ラベル領域を確保できる最小サイズ
const MIN_SIZE: (u32, u32) = (200, 150);

/// 描画設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct RenderConfig {
    /// 画像サイズ（幅, 高さ）
    pub size: (u32, u32),

    /// 棒の高さの扱い
    pub clamp_policy: ClampPolicy,

    /// タイトルのフォントサイズ（px）
    pub title_font_size: u32,

    /// 軸ラベルのフォントサイズ（px）
    pub label_font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: (1200, 600),
            clamp_policy: ClampPolicy::default(),
            title_font_size: 24,
            label_font_size: 14,
        }
    }
}

impl RenderConfig {
    fn validate(&self) -> Result<(), ChartError> {
        let (width, height) = self.size;
        if width < MIN_SIZE.0 || height < MIN_SIZE.1 {
            return Err(ChartError::Config(format!(
                "Image size {}x{} is too small (min: {}x{})",
                width, height, MIN_SIZE.0, MIN_SIZE.1
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ChartError::Config(format!(
                "Image size {}x{} exceeds maximum of {} pixels per side",
                width, height, MAX_DIMENSION
            )));
        }

        if let ClampPolicy::Clamped { ceiling } = self.clamp_policy {
            if !ceiling.is_finite() || ceiling <= 0.0 {
                return Err(ChartError::Config(format!(
                    "Clamp ceiling must be a positive finite number, got {}",
                    ceiling
                )));
            }
        }

        if self.title_font_size == 0 || self.label_font_size == 0 {
            return Err(ChartError::Config(
                "Font sizes must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// `ChartRenderer`のビルダー
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use pcrchart::{ChartRendererBuilder, ClampPolicy};
///
/// # fn main() -> Result<(), pcrchart::ChartError> {
/// let renderer = ChartRendererBuilder::new()
///     .with_size((800, 400))
///     .with_clamp_policy(ClampPolicy::Unclamped)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ChartRendererBuilder {
    config: RenderConfig,
}

impl ChartRendererBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 画像サイズ: 1200x600
    /// - 高さの扱い: 2.0でクランプ
    /// - タイトル: 24px、軸ラベル: 14px
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像サイズ（幅, 高さ）をピクセル単位で指定する
    pub fn with_size(mut self, size: (u32, u32)) -> Self {
        self.config.size = size;
        self
    }

    /// 棒の高さの扱いを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use pcrchart::{ChartRendererBuilder, ClampPolicy};
    ///
    /// let builder = ChartRendererBuilder::new()
    ///     .with_clamp_policy(ClampPolicy::Clamped { ceiling: 5.0 });
    /// ```
    pub fn with_clamp_policy(mut self, policy: ClampPolicy) -> Self {
        self.config.clamp_policy = policy;
        self
    }

    pub fn with_title_font_size(mut self, size: u32) -> Self {
        self.config.title_font_size = size;
        self
    }

    pub fn with_label_font_size(mut self, size: u32) -> Self {
        self.config.label_font_size = size;
        self
    }

    /// 設定を検証し、`ChartRenderer`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(ChartRenderer)`: 設定が有効な場合
    /// * `Err(ChartError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * 画像サイズが200x150未満、または1辺が8192ピクセルを超える
    /// * クランプ上限が正の有限値でない
    /// * フォントサイズが0
    pub fn build(self) -> Result<ChartRenderer, ChartError> {
        self.config.validate()?;
        Ok(ChartRenderer::new(self.config))
    }
}

/// 読み込みから出力までをまとめて実行する`Report`のビルダー
///
/// # 使用例
///
/// ```rust,no_run
/// use pcrchart::{ReportBuilder, SheetSelector};
/// use std::fs::File;
///
/// # fn main() -> Result<(), pcrchart::ChartError> {
/// let report = ReportBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Results".to_string()))
///     .build()?;
/// let archive = report.bundle(File::open("results.xlsx")?)?;
/// std::fs::write("charts.zip", archive)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReportBuilder {
    sheet_selector: SheetSelector,
    required_columns: Vec<String>,
    renderer: ChartRendererBuilder,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// 必須列は`DEFAULT_REQUIRED_COLUMNS`、シートは先頭シートです。
    pub fn new() -> Self {
        Self {
            sheet_selector: SheetSelector::default(),
            required_columns: DEFAULT_REQUIRED_COLUMNS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            renderer: ChartRendererBuilder::new(),
        }
    }

    /// 読み込むシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.sheet_selector = selector;
        self
    }

    /// 必須列を指定する
    ///
    /// # 引数
    ///
    /// * `columns`: ヘッダー行に存在しなければならない列名（順序は問わない）
    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_clamp_policy(mut self, policy: ClampPolicy) -> Self {
        self.renderer = self.renderer.with_clamp_policy(policy);
        self
    }

    pub fn with_size(mut self, size: (u32, u32)) -> Self {
        self.renderer = self.renderer.with_size(size);
        self
    }

    /// 設定を検証し、`Report`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Err(ChartError::Config)`: 必須列が空の場合、または描画設定が無効な場合
    pub fn build(self) -> Result<Report, ChartError> {
        if self.required_columns.is_empty() {
            return Err(ChartError::Config(
                "At least one required column must be specified".to_string(),
            ));
        }

        Ok(Report {
            sheet_selector: self.sheet_selector,
            required_columns: self.required_columns,
            extractor: TableExtractor::new(),
            renderer: self.renderer.build()?,
        })
    }
}

/// 読み込み・検証・抽出・描画・出力のファサード
///
/// 状態を持たないため、同じ`Report`で複数の入力を処理できます。
#[derive(Debug, Clone)]
pub struct Report {
    sheet_selector: SheetSelector,
    required_columns: Vec<String>,
    extractor: TableExtractor,
    renderer: ChartRenderer,
}

impl Report {
    /// 設定済みの描画器
    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    pub fn required_columns(&self) -> &[String] {
        &self.required_columns
    }

    /// ワークブックを読み込み、必須列を検証してレコードを抽出する
    ///
    /// # 戻り値
    ///
    /// * `Err(ChartError::MissingColumns)` - 必須列が欠けている場合（レコードは生成されない）
    /// * `Err(ChartError::MalformedTable)` / `Err(ChartError::MalformedRow)` - 表の形が不正な場合
    pub fn load_records<R: Read + Seek>(&self, reader: R) -> Result<Vec<ChartRecord>, ChartError> {
        let table = crate::parser::read_table(reader, &self.sheet_selector)?;
        TableExtractor::validate(&table, &self.required_columns)?;
        self.extractor.extract(&table)
    }

    /// 全レコードを描画し、ZIPアーカイブのバイト列を返す
    pub fn bundle<R: Read + Seek>(&self, reader: R) -> Result<Vec<u8>, ChartError> {
        let records = self.load_records(reader)?;
        crate::output::bundle(&records, &self.renderer)
    }

    /// 全レコードを描画し、`output_dir`にPNGファイルとして書き出す
    pub fn write_charts<R: Read + Seek>(
        &self,
        reader: R,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, ChartError> {
        let records = self.load_records(reader)?;
        crate::output::write_charts(&records, &self.renderer, output_dir)
    }
}
