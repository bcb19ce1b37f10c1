//! Artifact Module
//!
//! ランキング表をXLSXファイルとして書き出すための成果物（ArtifactWriter）を提供するモジュール。
//! 書き出しには`rust_xlsxwriter`を使用します。

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

use crate::error::ReportError;
use crate::schema::DEFAULT_PRODUCT_LABEL;
use crate::types::AggregatedRecord;

/// 成果物ファイル名の接頭辞
pub const ARTIFACT_PREFIX: &str = "sales_report_";

/// 成果物ファイルの拡張子
pub const ARTIFACT_EXTENSION: &str = ".xlsx";

/// 成果物のワークシート名
const SHEET_NAME: &str = "Report";

/// 数量列・金額列の見出し（商品名列はスキーマのラベルを使う）
const VALUE_HEADERS: [&str; 2] = ["Количество", "Сумма"];

/// レポート日付をファイル名に使える文字列に変換
///
/// 英数字、`.`、`_`、`-`以外の文字はすべて`_`に置き換えます。
///
/// # 使用例
///
/// ```rust
/// use posdigest::sanitize_date;
///
/// assert_eq!(sanitize_date("01.02.2024"), "01.02.2024");
/// assert_eq!(sanitize_date("01/02/2024 10:00"), "01_02_2024_10_00");
/// ```
pub fn sanitize_date(report_date: &str) -> String {
    report_date
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// 成果物のファイル名を生成（例: `sales_report_01.02.2024.xlsx`）
pub fn artifact_filename(report_date: &str) -> String {
    format!(
        "{}{}{}",
        ARTIFACT_PREFIX,
        sanitize_date(report_date),
        ARTIFACT_EXTENSION
    )
}

/// 永続化・送信用の成果物
///
/// 解析呼び出しごとに1つ生成され、呼び出し側に引き渡されます。
/// 行の順序はランキング順のままで、優先度フラグは列として持ちません。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    /// サニタイズ済みのファイル名
    pub filename: String,

    /// 商品名列の見出し
    pub product_label: String,

    /// ランキング順のレコード
    pub records: Vec<AggregatedRecord>,
}

impl ReportArtifact {
    /// レポート日付とランキング済みレコードから成果物を生成
    ///
    /// 商品名列の見出しは既定のラベルになります。
    pub fn new(report_date: &str, records: Vec<AggregatedRecord>) -> Self {
        Self {
            filename: artifact_filename(report_date),
            product_label: DEFAULT_PRODUCT_LABEL.to_string(),
            records,
        }
    }

    /// 商品名列の見出しを設定
    pub fn with_product_label(mut self, label: impl Into<String>) -> Self {
        self.product_label = label.into();
        self
    }

    /// XLSXとしてメモリ上にシリアライズ
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - XLSXファイルのバイト列
    /// * `Err(ReportError::Xlsx)` - 書き出しに失敗した場合
    pub fn to_xlsx_buffer(&self) -> Result<Vec<u8>, ReportError> {
        let mut workbook = self.build_workbook()?;
        Ok(workbook.save_to_buffer()?)
    }

    /// 指定ディレクトリに`filename`で保存し、保存先のパスを返す
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ReportError> {
        let path = dir.as_ref().join(&self.filename);
        let mut workbook = self.build_workbook()?;
        workbook.save(&path)?;
        log::debug!("artifact written to {}", path.display());
        Ok(path)
    }

    fn build_workbook(&self) -> Result<Workbook, ReportError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        worksheet.write_string_with_format(0, 0, &self.product_label, &header_format)?;
        for (col, title) in VALUE_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16 + 1, *title, &header_format)?;
        }

        for (idx, record) in self.records.iter().enumerate() {
            let row = u32::try_from(idx + 1).map_err(|_| {
                ReportError::Config(format!("Too many rows for a worksheet: {}", idx + 1))
            })?;
            worksheet.write_string(row, 0, &record.product_name)?;
            worksheet.write_number(row, 1, record.total_quantity)?;
            worksheet.write_number(row, 2, record.total_amount)?;
        }

        worksheet.autofit();
        Ok(workbook)
    }
}
