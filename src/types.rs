//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::Serialize;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時（Excelシリアル値、1900年システム）
    DateTime(f64),

    /// ISO 8601形式の日時文字列
    DateTimeIso(String),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    ///
    /// 空白のみの文字列も空として扱います。
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 値を文字列として取得（書式適用前）
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Number(n) | CellValue::DateTime(n) => n.to_string(),
            CellValue::String(s) | CellValue::DateTimeIso(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }

    /// ラベルとの完全一致判定（文字列セルのみ、正規化なし）
    pub fn is_label(&self, label: &str) -> bool {
        matches!(self, CellValue::String(s) if s == label)
    }

    /// 列ラベルとの完全一致判定
    ///
    /// 文字列以外のセル（数値など）は`as_raw_string`の結果で比較します。
    /// 空セルはどのラベルにも一致しません。
    pub fn is_column_label(&self, label: &str) -> bool {
        match self {
            CellValue::String(s) => s == label,
            CellValue::Empty => false,
            other => other.as_raw_string() == label,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

/// 検証済みの列から読み出した1行分の売上明細
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LineItem {
    /// 商品名（集計キー、トリム前の原文）
    pub product_name: String,

    /// 数量
    pub quantity: f64,

    /// 税込金額
    pub amount: f64,
}

/// 商品ごとの集計結果
///
/// 商品名は元データの表記そのまま（大文字小文字の正規化なし）で、
/// 合計値は小数第2位で丸められています。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRecord {
    /// 商品名
    pub product_name: String,

    /// 数量の合計
    pub total_quantity: f64,

    /// 税込金額の合計
    pub total_amount: f64,
}

impl AggregatedRecord {
    /// 新しい集計レコードを生成
    pub fn new(product_name: impl Into<String>, total_quantity: f64, total_amount: f64) -> Self {
        Self {
            product_name: product_name.into(),
            total_quantity,
            total_amount,
        }
    }
}

/// 優先度順に並べ替えた集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReport {
    /// レポート日付（`DD.MM.YYYY`、生文字列、または`unknown`）
    pub report_date: String,

    /// 優先度（降順）、金額（降順）で並んだレコード
    pub records: Vec<AggregatedRecord>,
}
