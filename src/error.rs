//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// posdigestクレート全体で使用するエラー型
///
/// 売上レポートの読み込み、検証、集計、成果物の書き出し中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
/// どのエラーもその解析呼び出しにとって終端的であり、部分的な結果は返されません。
///
/// # エラーの種類
///
/// - `HeaderNotFound`: アンカーラベルを含む行が見つからない
/// - `MissingRequiredColumns`: ヘッダー行に必須列が欠けている
/// - `EmptyDataset`: フィルタ後に明細が残らない（`EmptyDatasetPolicy::Reject`時のみ）
/// - `InvalidNumber`: 数量・金額セルが数値として解釈できない
/// - `Io` / `Parse` / `Xlsx` / `Zip`: 入出力とファイル形式のエラー
/// - `Config`: ビルダー設定の検証エラー
/// - `SecurityViolation`: 入力サイズやZIP構造の制限違反
///
/// # 使用例
///
/// ```rust,no_run
/// use posdigest::{AnalyzerBuilder, ReportError};
///
/// # fn main() -> Result<(), ReportError> {
/// let analyzer = AnalyzerBuilder::new().build()?;
/// match analyzer.analyze_path("report.xlsx") {
///     Ok(report) => println!("{}", report.report_text),
///     Err(ReportError::HeaderNotFound { anchor }) => {
///         eprintln!("'{}' を含む行がありません", anchor);
///     }
///     Err(e) => eprintln!("{}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ReportError {
    /// アンカーラベルを含むヘッダー行が見つからなかった
    ///
    /// 入力が想定したPOSレポート形式ではない可能性があります。
    #[error("Header row not found: no cell equals '{anchor}'")]
    HeaderNotFound {
        /// 探索したアンカーラベル
        anchor: String,
    },

    /// ヘッダー行は見つかったが、必須列が欠けている
    ///
    /// 欠けているすべての列ラベルを、商品名・数量・金額の順で保持します。
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingRequiredColumns {
        /// 見つからなかった列ラベル
        columns: Vec<String>,
    },

    /// フィルタ後に明細が1件も残らなかった
    #[error("No sales rows left after filtering")]
    EmptyDataset,

    /// 数量・金額セルの値が数値として解釈できない
    #[error("Invalid number in column '{column}' at row {row}: '{value}'")]
    InvalidNumber {
        /// スプレッドシート上の行番号（1始まり）
        row: usize,
        /// 列ラベル
        column: String,
        /// 元のセル値
        value: String,
    },

    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// 成果物XLSXの書き出し中に発生したエラー（rust_xlsxwriter由来）
    #[error("Failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// ZIPアーカイブの解析エラー
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `AnalyzerBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use posdigest::{AnalyzerBuilder, ReportError};
    ///
    /// let result = AnalyzerBuilder::new()
    ///     .with_column_widths(0, 10)
    ///     .build();
    ///
    /// match result {
    ///     Err(ReportError::Config(msg)) => println!("設定エラー: {}", msg),
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb、パストラバーサル、入力サイズ制限などに違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
