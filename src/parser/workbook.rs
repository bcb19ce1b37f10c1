//! Workbook Parser
//!
//! calamineを使用して、ワークブックの最初のシートをグリッドとして読み込みます。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::{Cursor, Read};

use crate::error::ReportError;
use crate::formatter::datetime_to_serial;
use crate::grid::Grid;
use crate::security::SecurityConfig;
use crate::types::CellValue;

/// ワークブックパーサー
///
/// calamineのラッパーとして、入力の検証と最初のシートの読み込みを行います。
pub(crate) struct WorkbookParser<'a> {
    security: &'a SecurityConfig,
}

impl<'a> WorkbookParser<'a> {
    pub fn new(security: &'a SecurityConfig) -> Self {
        Self { security }
    }

    /// 入力を読み込み、最初のシートをグリッドに変換する
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(Grid)` - 最初のシートのセル行列（行0がスプレッドシートの1行目）
    /// * `Err(ReportError)` - サイズ制限違反、解析失敗、シートが存在しない場合
    pub fn parse_first_sheet<R: Read>(&self, mut reader: R) -> Result<Grid, ReportError> {
        // 1. 入力をメモリに読み込む（サイズ制限を適用）
        let mut buffer = Vec::new();
        reader
            .by_ref()
            .take(self.security.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        self.security.check_input_size(buffer.len())?;

        // 2. ZIP構造の事前検証
        self.security.check_archive(Cursor::new(buffer.as_slice()))?;

        // 3. calamineでワークブックを開き、最初のシートを取得
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| calamine::Error::Msg("Workbook contains no sheets"))??;

        self.range_to_grid(&range)
    }

    /// calamineの範囲をグリッドに変換
    ///
    /// 使用範囲がA1から始まらない場合も、行0がスプレッドシートの1行目になるよう
    /// 先頭に空行・空セルを補います。
    fn range_to_grid(&self, range: &Range<Data>) -> Result<Grid, ReportError> {
        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let total_rows = start_row + range.height();
        if total_rows > self.security.max_rows {
            return Err(ReportError::SecurityViolation(format!(
                "Sheet has too many rows: {} (max: {})",
                total_rows, self.security.max_rows
            )));
        }

        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];
        for row in range.rows() {
            let mut cells = vec![CellValue::Empty; start_col];
            cells.extend(row.iter().map(convert_cell));
            rows.push(cells);
        }

        log::debug!(
            "loaded first sheet: {} rows, used range starts at ({}, {})",
            rows.len(),
            start_row,
            start_col
        );
        Ok(Grid::new(rows))
    }
}

/// calamineのセル値を変換
///
/// 日付セルは1900年システムのシリアル値に正規化します（1904年システムの
/// ワークブックでも同じ日付になる）。経過時間（`[h]:mm`など）のセルは
/// 日付として扱わず、数値のまま返します。
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::DateTime(datetime_to_serial(datetime)),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::DateTimeIso(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_convert_cell() {
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(
            convert_cell(&Data::String("Latte".to_string())),
            CellValue::from("Latte")
        );
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_convert_cell_normalizes_1904_dates() {
        let dt = ExcelDateTime::new(43861.0, ExcelDateTimeType::DateTime, true);
        assert_eq!(convert_cell(&Data::DateTime(dt)), CellValue::DateTime(45323.0));

        let dt = ExcelDateTime::new(45323.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(convert_cell(&Data::DateTime(dt)), CellValue::DateTime(45323.5));
    }

    #[test]
    fn test_convert_cell_keeps_durations_numeric() {
        let dt = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(convert_cell(&Data::DateTime(dt)), CellValue::Number(1.5));
    }

    #[test]
    fn test_range_to_grid_restores_offset() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Denumire marfa".to_string()));
        range.set_value((3, 2), Data::Float(5.0));

        let security = SecurityConfig::default();
        let grid = WorkbookParser::new(&security).range_to_grid(&range).unwrap();

        assert_eq!(grid.row_count(), 4);
        assert!(grid.row(0).is_empty());
        assert_eq!(grid.cell(2, 1), &CellValue::from("Denumire marfa"));
        assert_eq!(grid.cell(3, 2), &CellValue::Number(5.0));
        assert_eq!(grid.cell(2, 0), &CellValue::Empty);
    }

    #[test]
    fn test_range_to_grid_row_limit() {
        let range: Range<Data> = Range::new((0, 0), (9, 0));
        let security = SecurityConfig {
            max_rows: 5,
            ..SecurityConfig::default()
        };
        assert!(matches!(
            WorkbookParser::new(&security).range_to_grid(&range),
            Err(ReportError::SecurityViolation(_))
        ));
    }

    #[test]
    fn test_rejects_garbage_input() {
        let security = SecurityConfig::default();
        let result = WorkbookParser::new(&security).parse_first_sheet(&b"plain text"[..]);
        assert!(result.is_err());
    }
}
