//! Chart Layout
//!
//! 描画前の棒グラフの配置・高さ・スタイルを計算するモジュール。
//! 描画処理から独立しているため、棒の高さやマーカーの有無をそのまま検証できます。

use serde::Serialize;

use crate::api::{BarFill, ClampPolicy, Hatch};
use crate::error::ChartError;
use crate::types::{ChartRecord, GROUP_SIZE};

/// 2つのグループの間に空けるスロット数
pub const GROUP_GAP: usize = 2;

/// 1スロットに対する棒の幅
pub const BAR_WIDTH: f64 = 0.8;

/// 位置順の塗りつぶし色
pub const BAR_FILLS: [BarFill; 2 * GROUP_SIZE] = [
    BarFill::Black,
    BarFill::White,
    BarFill::Gray,
    BarFill::White,
    BarFill::Black,
    BarFill::White,
    BarFill::Gray,
    BarFill::White,
];

/// 位置順のハッチング
pub const BAR_HATCHES: [Hatch; 2 * GROUP_SIZE] = [
    Hatch::None,
    Hatch::None,
    Hatch::None,
    Hatch::Diagonal,
    Hatch::None,
    Hatch::None,
    Hatch::None,
    Hatch::Diagonal,
];

/// X軸両端の余白（スロット単位）
const X_PADDING: f64 = 0.7;

/// 自動スケール時の上側の余白（最大値に対する比率）
const AUTO_HEADROOM: f64 = 0.05;

/// 1本の棒
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    /// X軸上の位置（スロット番号）
    pub position: f64,
    /// X軸の目盛りラベル
    pub label: String,
    /// 元の値
    pub value: f64,
    /// 表示上の高さ
    pub height: f64,
    pub fill: BarFill,
    pub hatch: Hatch,
    /// 上限を超えたことを示す矢印を描くか
    pub overflow: bool,
}

/// 1枚のグラフの配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub bars: Vec<BarSpec>,
    /// Y軸の範囲 `(下限, 上限)`
    pub y_range: (f64, f64),
}

impl ChartLayout {
    /// レコードから配置を計算する
    ///
    /// `group1`はスロット0〜3、`group2`は`GROUP_GAP`分空けたスロット6〜9に並びます。
    ///
    /// # 戻り値
    ///
    /// * `Err(ChartError::Render)` - 数値でない値、または有限でない値が含まれる場合
    pub fn from_record(
        record: &ChartRecord,
        title: &str,
        policy: ClampPolicy,
    ) -> Result<Self, ChartError> {
        let group2_offset = record.group1.len() + GROUP_GAP;
        let positions = (0..record.group1.len())
            .chain((0..record.group2.len()).map(|i| i + group2_offset));

        let mut bars = Vec::with_capacity(record.group1.len() + record.group2.len());
        for (index, (metric, position)) in record.metrics().zip(positions).enumerate() {
            let value = match metric.value.as_number() {
                Some(v) if v.is_finite() => v,
                _ => {
                    return Err(ChartError::Render(format!(
                        "record '{}': value '{}' in column '{}' is not a finite number",
                        record.name, metric.value, metric.label
                    )))
                }
            };

            let (height, overflow) = match policy {
                ClampPolicy::Clamped { ceiling } => (value.clamp(0.0, ceiling), value > ceiling),
                ClampPolicy::Unclamped => (value, false),
            };

            bars.push(BarSpec {
                position: position as f64,
                label: metric.label.clone(),
                value,
                height,
                fill: BAR_FILLS[index % BAR_FILLS.len()],
                hatch: BAR_HATCHES[index % BAR_HATCHES.len()],
                overflow,
            });
        }

        let y_range = match policy {
            ClampPolicy::Clamped { ceiling } => (0.0, ceiling),
            ClampPolicy::Unclamped => auto_range(&bars),
        };

        Ok(Self {
            title: title.to_string(),
            bars,
            y_range,
        })
    }

    /// X軸の範囲
    pub fn x_range(&self) -> (f64, f64) {
        let first = self.bars.first().map(|bar| bar.position).unwrap_or(0.0);
        let last = self.bars.last().map(|bar| bar.position).unwrap_or(0.0);
        (first - X_PADDING, last + X_PADDING)
    }

    /// 表示上の高さを位置順に返す
    pub fn heights(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.height).collect()
    }

    /// 矢印マーカーを描く棒のインデックス
    pub fn overflow_indices(&self) -> Vec<usize> {
        self.bars
            .iter()
            .enumerate()
            .filter(|(_, bar)| bar.overflow)
            .map(|(i, _)| i)
            .collect()
    }

    /// 位置からラベルを引く（目盛りラベルの描画用）
    pub fn label_at(&self, position: f64) -> Option<&str> {
        self.bars
            .iter()
            .find(|bar| (bar.position - position).abs() < 1e-6)
            .map(|bar| bar.label.as_str())
    }
}

/// 自動スケールのY軸範囲
///
/// 0を必ず含め、上側に5%の余白を取ります。
fn auto_range(bars: &[BarSpec]) -> (f64, f64) {
    let max = bars.iter().map(|b| b.height).fold(0.0f64, f64::max);
    let min = bars.iter().map(|b| b.height).fold(0.0f64, f64::min);

    let top = if max > 0.0 { max * (1.0 + AUTO_HEADROOM) } else { 1.0 };
    let bottom = if min < 0.0 { min * (1.0 + AUTO_HEADROOM) } else { 0.0 };
    (bottom, top)
}

/// 矩形内に右上がり45度の斜線を引くための線分を計算する
///
/// 座標はピクセル単位で、`(left, top)`〜`(right, bottom)`の矩形（Y軸は下向き）に
/// クリップされた線分を返します。
pub fn hatch_segments(
    (left, top): (i32, i32),
    (right, bottom): (i32, i32),
    spacing: i32,
) -> Vec<((i32, i32), (i32, i32))> {
    let mut segments = Vec::new();
    if right <= left || bottom <= top || spacing <= 0 {
        return segments;
    }

    // 右上がりの線は x + y = c の形になる
    let mut c = left + top + spacing;
    while c < right + bottom {
        // 下辺または左辺との交点（始点）
        let start = if c - bottom >= left {
            (c - bottom, bottom)
        } else {
            (left, c - left)
        };
        // 上辺または右辺との交点（終点）
        let end = if c - top <= right {
            (c - top, top)
        } else {
            (right, c - right)
        };
        segments.push((start, end));
        c += spacing;
    }
    segments
}
