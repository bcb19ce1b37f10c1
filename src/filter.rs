//! Record Filter Module
//!
//! ヘッダー行より下のデータ行から売上明細を読み出し、
//! 商品名のない行と除外対象（袋代など）の行を取り除くモジュール。

use crate::error::ReportError;
use crate::grid::Grid;
use crate::schema::{ColumnMap, ReportSchema};
use crate::types::{CellValue, LineItem};

/// 既定の除外文字列（レジ袋の明細）
pub const DEFAULT_EXCLUSION: &str = "Punga";

/// フィルタ処理の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FilterStats {
    /// 商品名が空で除外した行数
    pub blank: usize,
    /// 除外文字列に一致して除外した行数
    pub excluded: usize,
}

/// 明細行フィルタ
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordFilter<'a> {
    schema: &'a ReportSchema,
    columns: ColumnMap,
    exclusion: &'a str,
}

impl<'a> RecordFilter<'a> {
    pub fn new(schema: &'a ReportSchema, columns: ColumnMap, exclusion: &'a str) -> Self {
        Self {
            schema,
            columns,
            exclusion,
        }
    }

    /// ヘッダー行より下の行から明細を抽出する
    ///
    /// 数量・金額が0や負の値でも行は除外しません。
    /// 数量・金額は、除外判定を通過した行についてのみ解釈されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok((Vec<LineItem>, FilterStats))` - 明細と除外件数
    /// * `Err(ReportError::InvalidNumber)` - 数量・金額が数値として解釈できない場合
    pub fn extract(
        &self,
        grid: &Grid,
        header_row: usize,
    ) -> Result<(Vec<LineItem>, FilterStats), ReportError> {
        let mut items = Vec::new();
        let mut stats = FilterStats::default();

        for (row_idx, row) in grid.rows_below(header_row) {
            let Some(product_name) = product_text(row.get(self.columns.product)) else {
                stats.blank += 1;
                continue;
            };

            if product_name.contains(self.exclusion) {
                stats.excluded += 1;
                continue;
            }

            let quantity = parse_number(
                row.get(self.columns.quantity),
                row_idx,
                &self.schema.quantity_label,
            )?;
            let amount = parse_number(
                row.get(self.columns.amount),
                row_idx,
                &self.schema.amount_label,
            )?;

            items.push(LineItem {
                product_name,
                quantity,
                amount,
            });
        }

        Ok((items, stats))
    }
}

/// 商品名セルの文字列（空・空白のみの場合は`None`）
fn product_text(cell: Option<&CellValue>) -> Option<String> {
    match cell {
        None => None,
        Some(cell) if cell.is_empty() => None,
        Some(cell) => Some(cell.as_raw_string()),
    }
}

/// 数量・金額セルを数値として解釈
///
/// 空セルは0として扱い、文字列は小数点のカンマも受け付けます。
fn parse_number(cell: Option<&CellValue>, row_idx: usize, column: &str) -> Result<f64, ReportError> {
    let invalid = |value: String| ReportError::InvalidNumber {
        row: row_idx + 1,
        column: column.to_string(),
        value,
    };

    match cell {
        None | Some(CellValue::Empty) => Ok(0.0),
        Some(CellValue::Number(n)) => Ok(*n),
        Some(CellValue::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(CellValue::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| invalid(s.clone()))
        }
        Some(other) => Err(invalid(other.as_raw_string())),
    }
}
