//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 合計値の丸め方式
///
/// 集計後の数量と金額を小数第2位に丸める際の規則を指定します。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundingMode {
    /// 四捨五入（0から遠い方向へ丸める、デフォルト）
    ///
    /// 例: `0.125` → `0.13`、`-0.125` → `-0.13`
    #[default]
    HalfUp,

    /// 偶数丸め（銀行丸め）
    ///
    /// 例: `0.125` → `0.12`、`0.135` → `0.14`
    HalfEven,
}

/// フィルタ後に明細が残らなかった場合の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmptyDatasetPolicy {
    /// 空のレポートを正常な結果として返す（デフォルト）
    #[default]
    Allow,

    /// `ReportError::EmptyDataset`を返す
    Reject,
}

/// ランキング表の出力形式
///
/// # 出力例（`Text`）
///
/// ```text
/// 📊 Отчёт по продажам за 01.02.2024
///
/// Товар      Кол-во         Сумма
/// -------------------------------
/// Latte           3            75
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// 固定幅のテキスト表（デフォルト）
    #[default]
    Text,

    /// CSV形式（ヘッダー: `product,quantity,amount`）
    Csv,

    /// JSON形式
    ///
    /// ```json
    /// {
    ///   "report_date": "01.02.2024",
    ///   "records": [
    ///     {"product_name": "Latte", "total_quantity": 3.0, "total_amount": 75.0}
    ///   ]
    /// }
    /// ```
    Json,
}
