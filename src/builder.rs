//! Builder Module
//!
//! Fluent Builder APIを提供し、`Analyzer`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::aggregate::{aggregate, rank};
use crate::api::{EmptyDatasetPolicy, OutputFormat, RoundingMode};
use crate::artifact::ReportArtifact;
use crate::date::extract_report_date;
use crate::error::ReportError;
use crate::filter::{RecordFilter, DEFAULT_EXCLUSION};
use crate::grid::Grid;
use crate::output::{OutputFormatter, TableLayout};
use crate::parser::WorkbookParser;
use crate::priority::PriorityCatalog;
use crate::schema::ReportSchema;
use crate::security::SecurityConfig;
use crate::types::{AggregatedRecord, RankedReport};

/// 送信先のメッセージ長上限の参考値（文字数）
pub const DEFAULT_MESSAGE_LIMIT: usize = 4096;

/// 解析処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct AnalysisConfig {
    /// 列構成
    pub schema: ReportSchema,

    /// 優先商品リスト（`None`の場合は既定のリスト）
    pub priority_products: Option<Vec<String>>,

    /// 除外文字列
    pub exclusion: String,

    /// 丸め方式
    pub rounding: RoundingMode,

    /// 空データの扱い
    pub empty_policy: EmptyDatasetPolicy,

    /// テキスト表の列幅
    pub layout: TableLayout,

    /// セキュリティ制限
    pub security: SecurityConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema: ReportSchema::default(),
            priority_products: None,
            exclusion: DEFAULT_EXCLUSION.to_string(),
            rounding: RoundingMode::default(),
            empty_policy: EmptyDatasetPolicy::default(),
            layout: TableLayout::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use posdigest::{AnalyzerBuilder, RoundingMode};
///
/// # fn main() -> Result<(), posdigest::ReportError> {
/// let analyzer = AnalyzerBuilder::new()
///     .with_rounding(RoundingMode::HalfEven)
///     .with_exclusion("Punga")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    /// 内部設定（構築中）
    config: AnalysisConfig,
}

impl AnalyzerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列構成: `Denumire marfa` / `Cantitate` / `Suma cu TVA fără reducere` / `Data`
    /// - 除外文字列: `Punga`
    /// - 優先商品: `DEFAULT_PRIORITY_PRODUCTS`
    /// - 丸め: 四捨五入
    /// - 空データ: 空のレポートとして返す
    pub fn new() -> Self {
        Self::default()
    }

    /// 列構成を指定する
    pub fn with_schema(mut self, schema: ReportSchema) -> Self {
        self.config.schema = schema;
        self
    }

    /// 優先商品リストを置き換える
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use posdigest::AnalyzerBuilder;
    ///
    /// let builder = AnalyzerBuilder::new()
    ///     .with_priority_products(["Espresso", "Bumble"]);
    /// ```
    pub fn with_priority_products<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.priority_products = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// 除外文字列を指定する（大文字小文字を区別する部分一致）
    pub fn with_exclusion(mut self, pattern: impl Into<String>) -> Self {
        self.config.exclusion = pattern.into();
        self
    }

    /// 丸め方式を指定する
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.config.rounding = rounding;
        self
    }

    /// フィルタ後に明細が残らない場合の扱いを指定する
    pub fn with_empty_dataset_policy(mut self, policy: EmptyDatasetPolicy) -> Self {
        self.config.empty_policy = policy;
        self
    }

    /// テキスト表の数量列・金額列の最小幅を指定する
    pub fn with_column_widths(mut self, quantity_width: usize, amount_width: usize) -> Self {
        self.config.layout = TableLayout {
            quantity_width,
            amount_width,
        };
        self
    }

    /// セキュリティ制限を指定する
    pub fn with_security_config(mut self, security: SecurityConfig) -> Self {
        self.config.security = security;
        self
    }

    /// 設定を検証し、`Analyzer`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ReportError::Config(String)`: 設定の検証に失敗した場合
    ///   * 列ラベルが空
    ///   * 除外文字列が空（すべての行が除外されるため）
    ///   * 列幅が0
    ///   * セキュリティ制限が0
    pub fn build(self) -> Result<Analyzer, ReportError> {
        // 1. 列構成の検証
        self.config.schema.check()?;

        // 2. 除外文字列の検証
        if self.config.exclusion.is_empty() {
            return Err(ReportError::Config(
                "Exclusion pattern must not be empty".to_string(),
            ));
        }

        // 3. 列幅の検証
        let layout = self.config.layout;
        if layout.quantity_width == 0 || layout.amount_width == 0 {
            return Err(ReportError::Config(format!(
                "Column widths must be positive: quantity={}, amount={}",
                layout.quantity_width, layout.amount_width
            )));
        }

        // 4. セキュリティ制限の検証
        self.config.security.check()?;

        // 5. 優先商品カタログの構築（以後は変更されない）
        let catalog = match &self.config.priority_products {
            Some(names) => PriorityCatalog::new(names),
            None => PriorityCatalog::default(),
        };

        Ok(Analyzer {
            config: self.config,
            catalog,
        })
    }
}

/// 解析結果
///
/// レポート日付、全文のテキスト表、ランキング済みの表を保持します。
/// テキストは切り詰められていないため、送信サイズの上限は呼び出し側で判断します。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    /// レポート日付
    pub report_date: String,

    /// 固定幅のテキスト表（見出し行付き）
    pub report_text: String,

    /// ランキング順の集計結果
    pub ranked_table: Vec<AggregatedRecord>,

    /// 商品名列のラベル（成果物の見出しに使用）
    #[serde(skip)]
    pub product_label: String,
}

impl SalesReport {
    /// XLSX成果物を生成
    pub fn artifact(&self) -> ReportArtifact {
        ReportArtifact::new(&self.report_date, self.ranked_table.clone())
            .with_product_label(self.product_label.as_str())
    }

    /// テキストが指定文字数以内に収まるか
    ///
    /// 収まらない場合、呼び出し側は成果物ファイルでの送信などを選択します。
    pub fn fits_within(&self, limit: usize) -> bool {
        self.report_text.chars().count() <= limit
    }

    fn ranked(&self) -> RankedReport {
        RankedReport {
            report_date: self.report_date.clone(),
            records: self.ranked_table.clone(),
        }
    }
}

/// 解析処理のファサード
///
/// POSエクスポートを読み込み、集計・ランキングしたレポートを生成します。
/// 保持する状態は構築時の設定のみで、複数スレッドから同時に使用できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use posdigest::{AnalyzerBuilder, DEFAULT_MESSAGE_LIMIT};
///
/// # fn main() -> Result<(), posdigest::ReportError> {
/// let analyzer = AnalyzerBuilder::new().build()?;
/// let report = analyzer.analyze_path("export.xlsx")?;
///
/// if report.fits_within(DEFAULT_MESSAGE_LIMIT) {
///     println!("{}", report.report_text);
/// } else {
///     let path = report.artifact().save_in(std::env::temp_dir())?;
///     println!("saved {}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Analyzer {
    /// 解析設定
    config: AnalysisConfig,

    /// 優先商品カタログ
    catalog: PriorityCatalog,
}

impl Analyzer {
    /// 読み込み済みのグリッドを解析
    ///
    /// # 処理フロー
    ///
    /// 1. ヘッダー行の探索
    /// 2. 必須列の検証
    /// 3. レポート日付の抽出
    /// 4. 明細の抽出とフィルタ
    /// 5. 集計・ランキング
    /// 6. テキスト表の生成
    pub fn analyze_grid(&self, grid: &Grid) -> Result<SalesReport, ReportError> {
        let ranked = self.rank_grid(grid)?;
        let report_text = OutputFormatter::Text.render_to_string(&ranked, &self.config.layout)?;

        Ok(SalesReport {
            report_date: ranked.report_date,
            report_text,
            ranked_table: ranked.records,
            product_label: self.config.schema.product_label.clone(),
        })
    }

    /// グリッドを集計・ランキングする（テキスト生成なし）
    pub fn rank_grid(&self, grid: &Grid) -> Result<RankedReport, ReportError> {
        let schema = &self.config.schema;

        // 1. ヘッダー行の探索
        let header_row = schema.locate_header(grid)?;
        log::debug!("header row located at index {}", header_row);

        // 2. 必須列の検証
        let columns = schema.validate(grid.row(header_row))?;
        log::debug!("resolved columns: {:?}", columns);

        // 3. レポート日付の抽出（フィルタ前の行から）
        let report_date = extract_report_date(grid, header_row, columns.date);

        // 4. 明細の抽出とフィルタ
        let filter = RecordFilter::new(schema, columns, &self.config.exclusion);
        let (items, stats) = filter.extract(grid, header_row)?;
        if stats.excluded > 0 {
            log::debug!(
                "dropped {} rows matching '{}'",
                stats.excluded,
                self.config.exclusion
            );
        }

        if items.is_empty() {
            log::warn!("no sales rows left after filtering");
            if self.config.empty_policy == EmptyDatasetPolicy::Reject {
                return Err(ReportError::EmptyDataset);
            }
        }

        // 5. 集計・ランキング
        let totals = aggregate(&items, &self.catalog, self.config.rounding);
        let records = rank(totals);

        log::info!(
            "report {}: {} products from {} rows ({} blank, {} excluded)",
            report_date,
            records.len(),
            items.len(),
            stats.blank,
            stats.excluded
        );

        Ok(RankedReport {
            report_date,
            records,
        })
    }

    /// リーダーからワークブックを読み込んで解析
    pub fn analyze_reader<R: Read>(&self, reader: R) -> Result<SalesReport, ReportError> {
        let grid = WorkbookParser::new(&self.config.security).parse_first_sheet(reader)?;
        self.analyze_grid(&grid)
    }

    /// ファイルパスからワークブックを読み込んで解析
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<SalesReport, ReportError> {
        let file = File::open(path.as_ref())?;
        self.analyze_reader(file)
    }

    /// 複数のファイルを並列に解析
    ///
    /// 結果は入力と同じ順序で返され、各ファイルの成否は独立しています。
    pub fn analyze_batch<P>(&self, paths: &[P]) -> Vec<Result<SalesReport, ReportError>>
    where
        P: AsRef<Path> + Sync,
    {
        paths
            .par_iter()
            .map(|path| self.analyze_path(path))
            .collect()
    }

    /// 解析結果を指定されたフォーマットで出力する
    pub fn render(&self, report: &SalesReport, format: OutputFormat) -> Result<String, ReportError> {
        OutputFormatter::from_format(format).render_to_string(&report.ranked(), &self.config.layout)
    }
}
