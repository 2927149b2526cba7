//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 1グループあたりの指標列の数
pub const GROUP_SIZE: usize = 4;

/// 表の列数（識別子1列 + 指標8列）
pub const COLUMN_COUNT: usize = 1 + 2 * GROUP_SIZE;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 数値セルであれば値を返す
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 値を文字列として取得（書式適用前）
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => f.write_str("<empty>"),
            other => f.write_str(&other.as_raw_string()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

/// 列見出しと値の組
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: CellValue,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// 1行分のグラフデータ
///
/// 抽出時に行ごとに1つ生成され、描画で消費されます。
/// `group1`と`group2`は常に`GROUP_SIZE`個の要素を持ちます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// 行の識別子（1列目の値）。グラフのタイトルと出力ファイル名に使用
    pub name: String,

    /// 2〜5列目
    pub group1: Vec<Metric>,

    /// 6〜9列目
    pub group2: Vec<Metric>,
}

impl ChartRecord {
    /// すべての指標を位置順に返す
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.group1.iter().chain(self.group2.iter())
    }
}

/// ヘッダー行とデータ行からなる表
///
/// ワークブックから読み込むか、`Table::new`で直接構築します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// 列数（ヘッダー行の幅）
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// データ行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
