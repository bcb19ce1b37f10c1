//! posdigest - Daily sales digest from POS spreadsheet exports
//!
//! This crate reads a point-of-sale export (XLSX, XLS, ODS), locates the sales table,
//! filters out non-product rows, aggregates quantities and amounts per product,
//! ranks the result and renders it as a fixed-width text table or an XLSX artifact.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use posdigest::AnalyzerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create an analyzer with default settings
//!     let analyzer = AnalyzerBuilder::new().build()?;
//!
//!     // Analyze a POS export
//!     let report = analyzer.analyze_path("export.xlsx")?;
//!
//!     println!("{}", report.report_text);
//!     Ok(())
//! }
//! ```
//!
//! For in-memory input (for example a chat attachment), use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use posdigest::AnalyzerBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = AnalyzerBuilder::new().build()?;
//! let upload: Vec<u8> = vec![]; // Downloaded file bytes
//! let report = analyzer.analyze_reader(Cursor::new(upload))?;
//! let artifact = report.artifact();
//! let bytes = artifact.to_xlsx_buffer()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use posdigest::{AnalyzerBuilder, EmptyDatasetPolicy, ReportSchema, RoundingMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = AnalyzerBuilder::new()
//!         .with_schema(ReportSchema {
//!             date_label: None,
//!             ..ReportSchema::default()
//!         })
//!         .with_priority_products(["Espresso", "Flat White"])
//!         .with_rounding(RoundingMode::HalfEven)
//!         .with_empty_dataset_policy(EmptyDatasetPolicy::Reject)
//!         .build()?;
//!
//!     let report = analyzer.analyze_path("export.xlsx")?;
//!     println!("{}", report.report_text);
//!     Ok(())
//! }
//! ```
//!
//! # Working with Grids
//!
//! ```rust
//! use posdigest::{AnalyzerBuilder, CellValue, Grid};
//!
//! # fn main() -> Result<(), posdigest::ReportError> {
//! let grid = Grid::from_rows(vec![
//!     vec![
//!         CellValue::from("Denumire marfa"),
//!         CellValue::from("Cantitate"),
//!         CellValue::from("Suma cu TVA fără reducere"),
//!     ],
//!     vec![CellValue::from("Latte"), CellValue::from(2.0), CellValue::from(50.0)],
//!     vec![CellValue::from("Punga"), CellValue::from(1.0), CellValue::from(1.0)],
//! ]);
//!
//! let report = AnalyzerBuilder::new().build()?.analyze_grid(&grid)?;
//! assert_eq!(report.ranked_table.len(), 1);
//! assert_eq!(report.ranked_table[0].total_amount, 50.0);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod api;
mod artifact;
mod builder;
mod date;
mod error;
mod filter;
mod formatter;
mod grid;
mod output;
mod parser;
mod priority;
mod schema;
mod security;
mod types;

// 公開API
pub use api::{EmptyDatasetPolicy, OutputFormat, RoundingMode};
pub use artifact::{
    artifact_filename, sanitize_date, ReportArtifact, ARTIFACT_EXTENSION, ARTIFACT_PREFIX,
};
pub use builder::{Analyzer, AnalyzerBuilder, SalesReport, DEFAULT_MESSAGE_LIMIT};
pub use date::UNKNOWN_DATE;
pub use error::ReportError;
pub use filter::DEFAULT_EXCLUSION;
pub use grid::Grid;
pub use output::{TableLayout, DEFAULT_AMOUNT_WIDTH, DEFAULT_QUANTITY_WIDTH};
pub use priority::{PriorityCatalog, DEFAULT_PRIORITY_PRODUCTS};
pub use schema::{
    locate_header, ReportSchema, DEFAULT_AMOUNT_LABEL, DEFAULT_ANCHOR_LABEL, DEFAULT_DATE_LABEL,
    DEFAULT_PRODUCT_LABEL, DEFAULT_QUANTITY_LABEL,
};
pub use security::SecurityConfig;
pub use types::{AggregatedRecord, CellValue, RankedReport};
