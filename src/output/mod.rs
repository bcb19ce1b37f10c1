//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use crate::api::OutputFormat;
use crate::error::ReportError;
use crate::types::RankedReport;
use std::io::Write;

pub use formatters::*;

/// 数量列の既定の最小幅
pub const DEFAULT_QUANTITY_WIDTH: usize = 10;

/// 金額列の既定の最小幅
pub const DEFAULT_AMOUNT_WIDTH: usize = 14;

/// テキスト表の数値列の幅
///
/// 値がこの幅を超える場合も切り詰めず、その行だけ広がります。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// 数量列の最小幅
    pub quantity_width: usize,

    /// 金額列の最小幅
    pub amount_width: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            quantity_width: DEFAULT_QUANTITY_WIDTH,
            amount_width: DEFAULT_AMOUNT_WIDTH,
        }
    }
}

/// 出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Text,
    Csv,
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => OutputFormatter::Text,
            OutputFormat::Csv => OutputFormatter::Csv,
            OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// ランキング表を指定されたフォーマットで出力する
    pub fn render<W: Write>(
        &self,
        report: &RankedReport,
        layout: &TableLayout,
        writer: &mut W,
    ) -> Result<(), ReportError> {
        match self {
            OutputFormatter::Text => TextFormatter.render(report, layout, writer),
            OutputFormatter::Csv => CsvFormatter.render(report, writer),
            OutputFormatter::Json => JsonFormatter.render(report, writer),
        }
    }

    /// 文字列として出力する
    pub fn render_to_string(
        &self,
        report: &RankedReport,
        layout: &TableLayout,
    ) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        self.render(report, layout, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            ReportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
