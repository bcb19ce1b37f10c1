//! Grid Module
//!
//! ワークシートから読み込んだ生のセル行列を保持するモジュール。
//! ヘッダー行が確定するまで列に型はなく、行ごとの長さも揃っている必要はありません。

use crate::types::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// セルの行列
///
/// 行は上から順に並び、各行は左から順にセル値を持ちます。
/// 行の長さが異なる場合、足りないセルは空セルとして読み出されます。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// グリッドデータ（行 × 列）
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// 行データからグリッドを構築
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// 任意のセル値に変換可能な行の並びからグリッドを構築
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use posdigest::{CellValue, Grid};
    ///
    /// let grid = Grid::from_rows(vec![
    ///     vec![CellValue::from("Denumire marfa"), CellValue::from("Cantitate")],
    ///     vec![CellValue::from("Latte"), CellValue::from(2.0)],
    /// ]);
    /// assert_eq!(grid.row_count(), 2);
    /// ```
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = CellValue>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().collect())
                .collect(),
        }
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 最も長い行の列数を取得
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// グリッドが空かどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 指定された行を取得（範囲外の場合は空スライス）
    pub fn row(&self, row_idx: usize) -> &[CellValue] {
        self.rows.get(row_idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 指定されたセルを取得（範囲外の場合は空セル）
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> &CellValue {
        self.row(row_idx).get(col_idx).unwrap_or(&EMPTY_CELL)
    }

    /// すべての行を先頭から走査
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// 指定された行より下の行を、行インデックスとともに走査
    pub(crate) fn rows_below(&self, row_idx: usize) -> impl Iterator<Item = (usize, &[CellValue])> {
        self.rows
            .iter()
            .enumerate()
            .skip(row_idx + 1)
            .map(|(idx, row)| (idx, row.as_slice()))
    }
}
