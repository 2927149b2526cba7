//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// 既定のクランプ上限値
pub const DEFAULT_CEILING: f64 = 2.0;

/// シート選択方式
///
/// グラフ化するデータを読み込むシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),
}

/// 棒の高さの扱い
///
/// 上限を超える値でグラフ全体の縮尺が崩れないよう、既定では上限でクランプします。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ClampPolicy {
    /// 表示上の高さを`[0, ceiling]`に制限し、上限を超えた棒の上に矢印を描く
    ///
    /// Y軸の範囲は`[0, ceiling]`に固定されます。
    Clamped {
        /// 上限値
        ceiling: f64,
    },

    /// 値をそのまま描画する（Y軸はデータに合わせて自動調整）
    Unclamped,
}

impl Default for ClampPolicy {
    fn default() -> Self {
        ClampPolicy::Clamped {
            ceiling: DEFAULT_CEILING,
        }
    }
}

/// 棒の塗りつぶし色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarFill {
    Black,
    White,
    Gray,
}

impl BarFill {
    /// RGB値
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            BarFill::Black => (0, 0, 0),
            BarFill::White => (255, 255, 255),
            BarFill::Gray => (128, 128, 128),
        }
    }
}

/// 棒のハッチング
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hatch {
    None,
    /// 右上がりの斜線
    Diagonal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_selector_is_first() {
        assert_eq!(SheetSelector::default(), SheetSelector::First);
    }

    #[test]
    fn test_default_clamp_policy() {
        assert_eq!(
            ClampPolicy::default(),
            ClampPolicy::Clamped { ceiling: 2.0 }
        );
    }

    #[test]
    fn test_bar_fill_rgb() {
        assert_eq!(BarFill::Black.rgb(), (0, 0, 0));
        assert_eq!(BarFill::White.rgb(), (255, 255, 255));
        assert_eq!(BarFill::Gray.rgb(), (128, 128, 128));
    }
}
