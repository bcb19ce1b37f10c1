//! Aggregation Module
//!
//! 商品名ごとの集計（Aggregator）と優先度順の並べ替え（Ranker）を提供するモジュール。

use std::collections::HashMap;

use crate::api::RoundingMode;
use crate::priority::PriorityCatalog;
use crate::types::{AggregatedRecord, LineItem};

/// 優先度フラグ付きの集計結果（並べ替え前）
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProductTotals {
    pub record: AggregatedRecord,
    pub priority: bool,
}

/// 明細を商品名ごとに集計する
///
/// 商品名は正規化せず、そのままの文字列をキーにします。
/// 出力は各商品が最初に現れた順に並び、合計値は小数第2位で丸められます。
/// グループ内に1件でも優先商品の明細があれば、そのグループは優先として扱います。
pub(crate) fn aggregate(
    items: &[LineItem],
    catalog: &PriorityCatalog,
    rounding: RoundingMode,
) -> Vec<ProductTotals> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ProductTotals> = Vec::new();

    for item in items {
        let priority = catalog.is_priority(&item.product_name);
        match index.get(item.product_name.as_str()) {
            Some(&pos) => {
                let entry = &mut totals[pos];
                entry.record.total_quantity += item.quantity;
                entry.record.total_amount += item.amount;
                entry.priority |= priority;
            }
            None => {
                index.insert(&item.product_name, totals.len());
                totals.push(ProductTotals {
                    record: AggregatedRecord::new(
                        item.product_name.clone(),
                        item.quantity,
                        item.amount,
                    ),
                    priority,
                });
            }
        }
    }

    for entry in &mut totals {
        entry.record.total_quantity = round_to_cents(entry.record.total_quantity, rounding);
        entry.record.total_amount = round_to_cents(entry.record.total_amount, rounding);
    }

    totals
}

/// 優先度（降順）、合計金額（降順）で並べ替え、優先度フラグを落とす
///
/// `sort_by`は安定ソートのため、同じ優先度・同じ金額のレコードは集計順を保ちます。
pub(crate) fn rank(mut totals: Vec<ProductTotals>) -> Vec<AggregatedRecord> {
    totals.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.record.total_amount.total_cmp(&a.record.total_amount))
    });
    totals.into_iter().map(|entry| entry.record).collect()
}

/// 小数第2位に丸める
pub(crate) fn round_to_cents(value: f64, rounding: RoundingMode) -> f64 {
    let scaled = value * 100.0;
    let rounded = match rounding {
        RoundingMode::HalfUp => scaled.round(),
        RoundingMode::HalfEven => scaled.round_ties_even(),
    };
    rounded / 100.0
}
