//! Parser Module
//!
//! calamineを使用したワークブック読み込みの実装。
//! 最初のシートのみを読み込み、セル行列（Grid）に変換します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
