//! Security Module
//!
//! アップロードされたレポートファイルに対するセキュリティ対策を実装するモジュール。
//! 入力サイズ制限、ZIP bomb攻撃、パストラバーサル攻撃への対策を提供します。

use std::io::{Read, Seek};

use zip::ZipArchive;

use crate::error::ReportError;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 50MB (52_428_800 bytes)
    pub max_input_file_size: u64,
    /// ZIPアーカイブ内の最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 単一ファイルの展開後の最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_file_size: u64,
    /// 展開後の合計最大サイズ（バイト）
    /// デフォルト: 512MB (536_870_912 bytes)
    pub max_decompressed_size: u64,
    /// 読み込む最大行数
    /// デフォルト: 200000
    pub max_rows: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 52_428_800, // 50MB
            max_file_count: 10_000,
            max_file_size: 104_857_600,          // 100MB
            max_decompressed_size: 536_870_912, // 512MB
            max_rows: 200_000,
        }
    }
}

impl SecurityConfig {
    /// 入力サイズの上限を検証
    pub(crate) fn check_input_size(&self, bytes: usize) -> Result<(), ReportError> {
        if bytes as u64 > self.max_input_file_size {
            return Err(ReportError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes, self.max_input_file_size
            )));
        }
        Ok(())
    }

    /// ZIPアーカイブ（XLSX/ODS）の構造を展開前に検証
    ///
    /// ZIPでない入力（旧形式のXLSなど）はそのまま通し、形式判定はcalamineに任せます。
    pub(crate) fn check_archive<R: Read + Seek>(&self, reader: R) -> Result<(), ReportError> {
        let mut archive = match ZipArchive::new(reader) {
            Ok(archive) => archive,
            Err(zip::result::ZipError::InvalidArchive(_)) => return Ok(()),
            Err(e) => return Err(ReportError::Zip(e.to_string())),
        };

        if archive.len() > self.max_file_count {
            return Err(ReportError::SecurityViolation(format!(
                "Archive contains too many files: {} (max: {})",
                archive.len(),
                self.max_file_count
            )));
        }

        let mut total_decompressed_size: u64 = 0;
        for i in 0..archive.len() {
            let file = archive
                .by_index(i)
                .map_err(|e| ReportError::Zip(e.to_string()))?;

            validate_zip_path(file.name()).map_err(ReportError::SecurityViolation)?;

            let file_size = file.size();
            if file_size > self.max_file_size {
                return Err(ReportError::SecurityViolation(format!(
                    "Archive entry '{}' is too large: {} bytes (max: {} bytes)",
                    file.name(),
                    file_size,
                    self.max_file_size
                )));
            }

            total_decompressed_size = total_decompressed_size.saturating_add(file_size);
            if total_decompressed_size > self.max_decompressed_size {
                return Err(ReportError::SecurityViolation(format!(
                    "Decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                    total_decompressed_size, self.max_decompressed_size
                )));
            }
        }

        Ok(())
    }

    /// ビルダーから渡された設定を検証
    pub(crate) fn check(&self) -> Result<(), ReportError> {
        if self.max_input_file_size == 0 || self.max_rows == 0 || self.max_file_count == 0 {
            return Err(ReportError::Config(
                "Security limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// ZIPエントリのパスを検証
///
/// # 戻り値
///
/// * `Ok(())` - パスが安全な場合
/// * `Err(String)` - パスが危険な場合（`..`や絶対パスを含む）
pub(crate) fn validate_zip_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    // 絶対パスを拒否（Windows形式の`C:\`やUnix形式の`/`で始まるパス）
    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    if path.contains("..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}
