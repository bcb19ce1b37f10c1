//! Priority Module
//!
//! 優先商品の判定（PriorityClassifier）を提供するモジュール。
//! 商品名はトリムと小文字化で正規化してから比較しますが、
//! 集計キーとして使う商品名そのものは変更しません。

use std::collections::HashSet;

/// 既定の優先商品リスト
///
/// 売上金額にかかわらず、レポートの先頭に並べる商品です。
pub const DEFAULT_PRIORITY_PRODUCTS: [&str; 33] = [
    "Espresso",
    "Espresso dublu",
    "Americano",
    "Americano cu lapte",
    "Cappuccino",
    "Cappuccino mare",
    "Latte",
    "Latte mare",
    "Flat White",
    "Raf",
    "Mocha",
    "Macchiato",
    "Latte Macchiato",
    "Cortado",
    "Lungo",
    "Ristretto",
    "Latte caramel",
    "Latte vanilie",
    "Latte alune",
    "Matcha Latte",
    "Chai Latte",
    "Ciocolată caldă",
    "Cacao",
    "Ceai verde",
    "Ceai negru",
    "Ceai de fructe",
    "Limonadă",
    "Ice Latte",
    "Ice Americano",
    "Frappe",
    "Espresso Tonic",
    "Croissant",
    "Cheesecake",
];

/// 優先商品カタログ
///
/// 構築後は変更されないため、スレッド間で同期なしに共有できます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityCatalog {
    names: HashSet<String>,
}

impl PriorityCatalog {
    /// 商品名のリストからカタログを構築
    ///
    /// 空白のみの名前は無視されます。
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| normalize(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// 商品名が優先商品かどうかを判定
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use posdigest::PriorityCatalog;
    ///
    /// let catalog = PriorityCatalog::default();
    /// assert!(catalog.is_priority(" espresso "));
    /// assert!(!catalog.is_priority("Punga"));
    /// ```
    pub fn is_priority(&self, product_name: &str) -> bool {
        self.names.contains(&normalize(product_name))
    }

    /// カタログ内の商品数
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// カタログが空かどうか
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for PriorityCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY_PRODUCTS)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
