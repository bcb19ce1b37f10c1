//! Date Extraction Module
//!
//! 日付列の最初の空でないセルからレポート日付を取り出すモジュール。
//! 日付の解釈に失敗してもエラーにはせず、元の文字列をそのまま使います。

use chrono::{NaiveDate, NaiveDateTime};

use crate::formatter::serial_to_date;
use crate::grid::Grid;
use crate::types::CellValue;

/// 日付列が存在しない、またはすべて空の場合の日付
pub const UNKNOWN_DATE: &str = "unknown";

/// 出力する日付形式
const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// 日を先に書く日時形式（時刻付き）
const DAY_FIRST_DATETIME_FORMATS: [&str; 6] = [
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

/// 日を先に書く日付形式
const DAY_FIRST_DATE_FORMATS: [&str; 3] = ["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// ISO 8601系の形式
const ISO_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// ヘッダー行より下の日付列からレポート日付を取り出す
///
/// # 戻り値
///
/// - 日付として解釈できた場合: `DD.MM.YYYY`
/// - 解釈できなかった場合: トリムした元の文字列
/// - 日付列がない、またはすべて空の場合: `"unknown"`
pub(crate) fn extract_report_date(grid: &Grid, header_row: usize, date_col: Option<usize>) -> String {
    let Some(col) = date_col else {
        return UNKNOWN_DATE.to_string();
    };

    grid.rows_below(header_row)
        .filter_map(|(_, row)| row.get(col))
        .find(|cell| !cell.is_empty())
        .map(describe_date)
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// セル値を表示用の日付文字列に変換
fn describe_date(cell: &CellValue) -> String {
    let parsed = match cell {
        CellValue::DateTime(serial) => serial_to_date(*serial),
        CellValue::DateTimeIso(text) | CellValue::String(text) => parse_day_first(text.trim()),
        _ => None,
    };

    match parsed {
        Some(date) => date.format(REPORT_DATE_FORMAT).to_string(),
        None => {
            let raw = cell.as_raw_string().trim().to_string();
            log::warn!("report date '{}' is not a recognizable date, using it verbatim", raw);
            raw
        }
    }
}

/// 日を先に書く規則で日付文字列を解釈
///
/// 日付＋時刻、日付のみ、ISO 8601形式の順に試します。
fn parse_day_first(text: &str) -> Option<NaiveDate> {
    DAY_FIRST_DATETIME_FORMATS
        .iter()
        .chain(ISO_DATETIME_FORMATS.iter())
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DAY_FIRST_DATE_FORMATS
                .iter()
                .chain(std::iter::once(&"%Y-%m-%d"))
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}
