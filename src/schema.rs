//! Schema Module
//!
//! ヘッダー行の探索（HeaderLocator）と必須列の検証（SchemaValidator）を提供するモジュール。
//! ラベルの比較はすべて完全一致で、トリムや大文字小文字の正規化は行いません。

use crate::error::ReportError;
use crate::grid::Grid;
use crate::types::CellValue;

/// ヘッダー行を見つけるためのアンカーラベル
pub const DEFAULT_ANCHOR_LABEL: &str = "Denumire marfa";

/// 商品名列のラベル
pub const DEFAULT_PRODUCT_LABEL: &str = "Denumire marfa";

/// 数量列のラベル
pub const DEFAULT_QUANTITY_LABEL: &str = "Cantitate";

/// 税込金額列のラベル
pub const DEFAULT_AMOUNT_LABEL: &str = "Suma cu TVA fără reducere";

/// 日付列のラベル（任意の列）
pub const DEFAULT_DATE_LABEL: &str = "Data";

/// レポートの列構成
///
/// POSエクスポートのヘッダー行を識別するアンカーと、
/// 集計に必要な列のラベルを保持します。
///
/// # 使用例
///
/// ```rust
/// use posdigest::ReportSchema;
///
/// let schema = ReportSchema {
///     date_label: None,
///     ..ReportSchema::default()
/// };
/// assert_eq!(schema.quantity_label, "Cantitate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSchema {
    /// ヘッダー行に含まれるアンカーラベル
    pub anchor_label: String,

    /// 商品名列のラベル
    pub product_label: String,

    /// 数量列のラベル
    pub quantity_label: String,

    /// 税込金額列のラベル
    pub amount_label: String,

    /// 日付列のラベル（`None`の場合、日付は常に`unknown`）
    pub date_label: Option<String>,
}

impl Default for ReportSchema {
    fn default() -> Self {
        Self {
            anchor_label: DEFAULT_ANCHOR_LABEL.to_string(),
            product_label: DEFAULT_PRODUCT_LABEL.to_string(),
            quantity_label: DEFAULT_QUANTITY_LABEL.to_string(),
            amount_label: DEFAULT_AMOUNT_LABEL.to_string(),
            date_label: Some(DEFAULT_DATE_LABEL.to_string()),
        }
    }
}

impl ReportSchema {
    /// アンカーラベルを含む最初の行のインデックスを返す
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 最初に一致した行のインデックス（0始まり）
    /// * `Err(ReportError::HeaderNotFound)` - どの行にもアンカーが存在しない場合
    pub fn locate_header(&self, grid: &Grid) -> Result<usize, ReportError> {
        locate_header(grid, &self.anchor_label)
    }

    /// ヘッダー行に必須列が揃っているかを検証し、列インデックスを解決する
    ///
    /// 欠けている列はすべて、商品名・数量・金額の順で報告されます。
    /// 同じラベルが複数回現れる場合は左端の列を使用します。
    pub(crate) fn validate(&self, header: &[CellValue]) -> Result<ColumnMap, ReportError> {
        let find = |label: &str| header.iter().position(|cell| cell.is_column_label(label));

        let product = find(&self.product_label);
        let quantity = find(&self.quantity_label);
        let amount = find(&self.amount_label);

        match (product, quantity, amount) {
            (Some(product), Some(quantity), Some(amount)) => {
                let date = self.date_label.as_deref().and_then(find);
                if date.is_none() {
                    log::debug!("date column not present in header");
                }
                Ok(ColumnMap {
                    product,
                    quantity,
                    amount,
                    date,
                })
            }
            _ => {
                let columns = [
                    (product, &self.product_label),
                    (quantity, &self.quantity_label),
                    (amount, &self.amount_label),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, label)| label.clone())
                .collect();
                Err(ReportError::MissingRequiredColumns { columns })
            }
        }
    }

    /// ビルダーから渡された設定を検証
    pub(crate) fn check(&self) -> Result<(), ReportError> {
        let labels = [
            ("anchor", &self.anchor_label),
            ("product", &self.product_label),
            ("quantity", &self.quantity_label),
            ("amount", &self.amount_label),
        ];
        for (name, label) in labels {
            if label.is_empty() {
                return Err(ReportError::Config(format!(
                    "The {} column label must not be empty",
                    name
                )));
            }
        }
        if matches!(self.date_label.as_deref(), Some("")) {
            return Err(ReportError::Config(
                "The date column label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// アンカーラベルと完全一致するセルを含む最初の行を探す
///
/// 後続の行に同じラベルが再び現れても、最初の一致のみを使用します。
pub fn locate_header(grid: &Grid, anchor: &str) -> Result<usize, ReportError> {
    grid.rows()
        .position(|row| row.iter().any(|cell| cell.is_label(anchor)))
        .ok_or_else(|| ReportError::HeaderNotFound {
            anchor: anchor.to_string(),
        })
}

/// 検証済みの列インデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub product: usize,
    pub quantity: usize,
    pub amount: usize,
    pub date: Option<usize>,
}
