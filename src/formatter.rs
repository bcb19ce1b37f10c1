//! Formatter Module
//!
//! 数値と日付の表示用フォーマットを提供するモジュール。

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Excelの1900年システムで表現できる最大のシリアル値（9999-12-31）
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// 数値を表示用文字列に変換
///
/// 小数第2位までフォーマットした後、末尾の0と小数点を取り除きます。
///
/// - `43.0` → `"43"`
/// - `43.50` → `"43.5"`
/// - `0.00` → `"0"`
pub(crate) fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Excelのシリアル日付値を日付に変換
///
/// 1899年12月30日起算で、時刻部分は切り捨てます。
/// 範囲外の値（負数、9999年以降、NaN）の場合は`None`を返します。
pub(crate) fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// 1970-01-01のシリアル値
const UNIX_EPOCH_SERIAL: f64 = 25_569.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// 日時を1900年システムのシリアル値に変換（`serial_to_date`の逆変換）
pub(crate) fn datetime_to_serial(datetime: NaiveDateTime) -> f64 {
    UNIX_EPOCH_SERIAL + datetime.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY
}
