//! Chart Renderer
//!
//! plottersのビットマップバックエンドで`ChartRecord`を棒グラフとして描画するモジュール。

use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

use crate::api::Hatch;
use crate::builder::RenderConfig;
use crate::error::ChartError;
use crate::layout::{hatch_segments, ChartLayout, BAR_WIDTH};
use crate::security::clean_filename;
use crate::types::ChartRecord;

/// 描画に使用するフォントファミリー名
const FONT_FAMILY: &str = "sans-serif";

/// 埋め込みフォント（DejaVu Sans）
static FONT_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

const MARGIN: u32 = 20;
const X_LABEL_AREA: u32 = 40;
const Y_LABEL_AREA: u32 = 60;
const HATCH_SPACING: i32 = 8;

/// X軸から目盛りラベル上端までの距離（ピクセル）
const TICK_LABEL_OFFSET: i32 = 6;

/// 矢印マーカーの寸法（ピクセル）
const ARROW_SHAFT: i32 = 16;
const ARROW_HEAD: i32 = 20;
const ARROW_HALF_WIDTH: i32 = 5;

/// 埋め込みフォントをplottersに登録する（プロセスごとに1回）
fn ensure_fonts() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            for style in [FontStyle::Normal, FontStyle::Bold] {
                register_font(FONT_FAMILY, style, FONT_BYTES)
                    .map_err(|_| "embedded font could not be loaded".to_string())?;
            }
            Ok(())
        })
        .clone()
        .map_err(ChartError::Render)
}

fn render_error<E: Display>(error: E) -> ChartError {
    ChartError::Render(error.to_string())
}

/// 棒1本分のピクセル矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    fn from_corners((x0, y0): (i32, i32), (x1, y1): (i32, i32)) -> Self {
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }

    /// 矩形の中心
    pub fn center(&self) -> (i32, i32) {
        ((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// 描画済みのグラフ
///
/// RGBのラスタと、描画に使用した配置情報を保持します。
#[derive(Debug, Clone)]
pub struct RenderedChart {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    layout: ChartLayout,
    bar_rects: Vec<PixelRect>,
}

impl RenderedChart {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB（1ピクセル3バイト）のラスタ
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// 描画に使用した配置（棒の高さ・スタイル・マーカー）
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// 位置順の棒のピクセル矩形
    pub fn bar_rects(&self) -> &[PixelRect] {
        &self.bar_rects
    }

    /// 指定座標のRGB値
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some((
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ))
    }

    /// PNGにエンコードする
    pub fn to_png(&self) -> Result<Vec<u8>, ChartError> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            &self.pixels,
            self.width,
            self.height,
            ColorType::Rgb8,
        )?;
        Ok(png)
    }
}

/// 棒グラフの描画器
///
/// 描画はレコードごとに独立しており、状態を持ちません。
///
/// # 使用例
///
/// ```rust,no_run
/// use pcrchart::{ChartRecord, ChartRendererBuilder, Metric};
///
/// # fn main() -> Result<(), pcrchart::ChartError> {
/// let renderer = ChartRendererBuilder::new().build()?;
/// let record = ChartRecord {
///     name: "Sample1".to_string(),
///     group1: vec![Metric::new("A1", 0.5), Metric::new("A2", 1.0), Metric::new("A3", 2.5), Metric::new("A4", 0.1)],
///     group2: vec![Metric::new("B1", 0.0), Metric::new("B2", 1.9), Metric::new("B3", 3.0), Metric::new("B4", 0.2)],
/// };
/// let png = renderer.render_png(&record, &record.name)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    config: RenderConfig,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl ChartRenderer {
    pub(crate) fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    #[cfg(test)]
    pub(crate) fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// レコードの配置を計算する（描画は行わない）
    pub fn layout(&self, record: &ChartRecord, title: &str) -> Result<ChartLayout, ChartError> {
        ChartLayout::from_record(record, title, self.config.clamp_policy)
    }

    /// レコードをメモリ上のラスタに描画する
    ///
    /// # 戻り値
    ///
    /// * `Err(ChartError::Render)` - 数値でない値が含まれる場合、または描画に失敗した場合
    pub fn render(&self, record: &ChartRecord, title: &str) -> Result<RenderedChart, ChartError> {
        let layout = self.layout(record, title)?;
        ensure_fonts()?;

        let (width, height) = self.config.size;
        let mut pixels = vec![0u8; width as usize * height as usize * 3];

        let bar_rects = {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            let rects = self.draw(&root, &layout)?;
            root.present().map_err(render_error)?;
            rects
        };

        debug!(record = %record.name, width, height, "rendered chart");

        Ok(RenderedChart {
            width,
            height,
            pixels,
            layout,
            bar_rects,
        })
    }

    /// レコードを描画してPNGのバイト列を返す
    pub fn render_png(&self, record: &ChartRecord, title: &str) -> Result<Vec<u8>, ChartError> {
        self.render(record, title)?.to_png()
    }

    /// レコードを描画してPNGファイルとして保存する
    ///
    /// `file_name`は`clean_filename`で無害化され、`output_dir`が存在しない場合は作成されます。
    /// 同名のファイルは上書きされます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き込んだファイルのパス
    pub fn save(
        &self,
        record: &ChartRecord,
        title: &str,
        output_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf, ChartError> {
        let png = self.render_png(record, title)?;

        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(clean_filename(file_name));

        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(&png)?;
        writer.flush()?;

        debug!(path = %path.display(), bytes = png.len(), "wrote chart");
        Ok(path)
    }

    fn draw(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        layout: &ChartLayout,
    ) -> Result<Vec<PixelRect>, ChartError> {
        root.fill(&WHITE).map_err(render_error)?;

        let (x_min, x_max) = layout.x_range();
        let (y_min, y_max) = layout.y_range;

        let mut chart = ChartBuilder::on(root)
            .caption(&layout.title, (FONT_FAMILY, self.config.title_font_size))
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(render_error)?;

        // X軸の目盛りは棒ごとに自前で描くため、メッシュ側のラベルと目盛り線は空にする
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_label_formatter(&|_| String::new())
            .y_label_style((FONT_FAMILY, self.config.label_font_size))
            .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
            .draw()
            .map_err(render_error)?;

        let tick_style = (FONT_FAMILY, self.config.label_font_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));

        let mut rects = Vec::with_capacity(layout.bars.len());
        for bar in &layout.bars {
            let left = bar.position - BAR_WIDTH / 2.0;
            let right = bar.position + BAR_WIDTH / 2.0;
            let corners = [(left, 0.0), (right, bar.height)];

            let (r, g, b) = bar.fill.rgb();
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    corners,
                    RGBColor(r, g, b).filled(),
                )))
                .map_err(render_error)?;

            let rect = PixelRect::from_corners(
                chart.backend_coord(&(left, bar.height)),
                chart.backend_coord(&(right, 0.0)),
            );

            if bar.hatch == Hatch::Diagonal {
                for (start, end) in hatch_segments(
                    (rect.left, rect.top),
                    (rect.right, rect.bottom),
                    HATCH_SPACING,
                ) {
                    root.draw(&PathElement::new(vec![start, end], BLACK.stroke_width(1)))
                        .map_err(render_error)?;
                }
            }

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    corners,
                    BLACK.stroke_width(1),
                )))
                .map_err(render_error)?;

            if bar.overflow {
                let (x, y) = chart.backend_coord(&(bar.position, y_max));
                root.draw(&PathElement::new(
                    vec![(x, y - 2), (x, y - ARROW_SHAFT)],
                    RED.stroke_width(2),
                ))
                .map_err(render_error)?;
                root.draw(&Polygon::new(
                    vec![
                        (x - ARROW_HALF_WIDTH, y - ARROW_SHAFT + 4),
                        (x + ARROW_HALF_WIDTH, y - ARROW_SHAFT + 4),
                        (x, y - ARROW_HEAD),
                    ],
                    RED.filled(),
                ))
                .map_err(render_error)?;
            }

            let (x, axis_y) = chart.backend_coord(&(bar.position, y_min));
            root.draw(&Text::new(
                bar.label.as_str(),
                (x, axis_y + TICK_LABEL_OFFSET),
                tick_style.clone(),
            ))
            .map_err(render_error)?;

            rects.push(rect);
        }

        Ok(rects)
    }
}
