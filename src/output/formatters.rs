//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::error::ReportError;
use crate::formatter::format_number;
use crate::types::RankedReport;

use super::TableLayout;

/// 商品名列の見出し
pub const NAME_TITLE: &str = "Товар";

/// 数量列の見出し
pub const QUANTITY_TITLE: &str = "Кол-во";

/// 金額列の見出し
pub const AMOUNT_TITLE: &str = "Сумма";

/// 商品名列の右側に追加する余白
pub const NAME_PADDING: usize = 2;

/// 固定幅テキスト表のフォーマッター
pub struct TextFormatter;

impl TextFormatter {
    pub fn render<W: Write>(
        &self,
        report: &RankedReport,
        layout: &TableLayout,
        writer: &mut W,
    ) -> Result<(), ReportError> {
        // 1. 日付入りの見出し行
        writeln!(writer, "{}", report_heading(&report.report_date))?;
        writeln!(writer)?;

        // 2. 列幅の計算（表示幅ベース）
        let name_width = report
            .records
            .iter()
            .map(|r| r.product_name.width())
            .chain(std::iter::once(NAME_TITLE.width()))
            .max()
            .unwrap_or(0)
            + NAME_PADDING;

        // 3. 列見出しと区切り線
        let title_row = format!(
            "{}{}{}",
            pad_right(NAME_TITLE, name_width),
            pad_left(QUANTITY_TITLE, layout.quantity_width),
            pad_left(AMOUNT_TITLE, layout.amount_width),
        );
        writeln!(writer, "{}", title_row)?;
        writeln!(writer, "{}", "-".repeat(title_row.width()))?;

        // 4. 各行の出力（切り詰めは行わない）
        for record in &report.records {
            writeln!(
                writer,
                "{}{}{}",
                pad_right(&record.product_name, name_width),
                pad_left(&format_number(record.total_quantity), layout.quantity_width),
                pad_left(&format_number(record.total_amount), layout.amount_width),
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// CSV形式のフォーマッター
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(&self, report: &RankedReport, writer: &mut W) -> Result<(), ReportError> {
        writeln!(writer, "product,quantity,amount")?;
        for record in &report.records {
            writeln!(
                writer,
                "{},{},{}",
                escape_csv(&record.product_name),
                format_number(record.total_quantity),
                format_number(record.total_amount),
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// JSON形式のフォーマッター
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(&self, report: &RankedReport, writer: &mut W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *writer, report).map_err(|e| {
            ReportError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
        })?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// レポートの見出し行
pub(crate) fn report_heading(report_date: &str) -> String {
    format!("📊 Отчёт по продажам за {}", report_date)
}

/// 表示幅に基づいて右側を空白で埋める
fn pad_right(content: &str, width: usize) -> String {
    let padding = width.saturating_sub(content.width());
    format!("{}{}", content, " ".repeat(padding))
}

/// 表示幅に基づいて左側を空白で埋める（右揃え）
fn pad_left(content: &str, width: usize) -> String {
    let padding = width.saturating_sub(content.width());
    format!("{}{}", " ".repeat(padding), content)
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
