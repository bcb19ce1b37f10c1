//! Security Tests
//!
//! アップロードされたファイルに対するセキュリティ対策のテストケースを実装します。
//! ZIP bomb攻撃、パストラバーサル攻撃、入力サイズ・行数の制限を検証します。

use posdigest::{AnalyzerBuilder, ReportError, SecurityConfig};
use rust_xlsxwriter::Workbook;
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// 指定されたエントリを持つZIPアーカイブを作成
fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }
    zip_data
}

/// 正常な売上レポートのXLSX
fn sales_export(rows: u32) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Denumire marfa").unwrap();
    worksheet.write_string(0, 1, "Cantitate").unwrap();
    worksheet.write_string(0, 2, "Suma cu TVA fără reducere").unwrap();
    for row in 1..=rows {
        worksheet.write_string(row, 0, "Latte").unwrap();
        worksheet.write_number(row, 1, 1.0).unwrap();
        worksheet.write_number(row, 2, 25.0).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

fn expect_violation(result: Result<posdigest::SalesReport, ReportError>, needle: &str) {
    match result {
        Err(ReportError::SecurityViolation(msg)) => {
            assert!(msg.contains(needle), "unexpected message: {}", msg);
        }
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
}

/// ZIP bomb攻撃のテスト: 大量のファイルを含むZIPアーカイブ
#[test]
fn test_zip_bomb_too_many_files() {
    // 10,001個のファイルを含むZIPアーカイブを作成（上限: 10,000）
    let names: Vec<String> = (0..10_001).map(|i| format!("xl/file{}.xml", i)).collect();
    let entries: Vec<(&str, &[u8])> = names.iter().map(|n| (n.as_str(), &b"test"[..])).collect();
    let zip_data = build_zip(&entries);

    let analyzer = AnalyzerBuilder::new().build().unwrap();
    expect_violation(analyzer.analyze_reader(Cursor::new(zip_data)), "too many files");
}

/// ZIP bomb攻撃のテスト: 展開後のサイズが上限を超えるZIPアーカイブ
#[test]
fn test_zip_bomb_large_decompressed_size() {
    let payload = vec![0u8; 4096];
    let zip_data = build_zip(&[("xl/a.xml", payload.as_slice()), ("xl/b.xml", payload.as_slice())]);

    let analyzer = AnalyzerBuilder::new()
        .with_security_config(SecurityConfig {
            max_decompressed_size: 6000,
            ..SecurityConfig::default()
        })
        .build()
        .unwrap();
    expect_violation(analyzer.analyze_reader(Cursor::new(zip_data)), "Decompressed size");
}

/// 単一エントリのサイズ制限
#[test]
fn test_zip_entry_too_large() {
    let payload = vec![0u8; 2048];
    let zip_data = build_zip(&[("xl/worksheets/sheet1.xml", payload.as_slice())]);

    let analyzer = AnalyzerBuilder::new()
        .with_security_config(SecurityConfig {
            max_file_size: 1024,
            ..SecurityConfig::default()
        })
        .build()
        .unwrap();
    expect_violation(analyzer.analyze_reader(Cursor::new(zip_data)), "too large");
}

/// パストラバーサル攻撃のテスト: `..`を含むパス
#[test]
fn test_path_traversal_dotdot() {
    let zip_data = build_zip(&[("../etc/passwd", &b"test"[..])]);
    let analyzer = AnalyzerBuilder::new().build().unwrap();
    expect_violation(analyzer.analyze_reader(Cursor::new(zip_data)), "Path traversal");
}

/// パストラバーサル攻撃のテスト: 絶対パス
#[test]
fn test_path_traversal_absolute_path() {
    let zip_data = build_zip(&[("/etc/passwd", &b"test"[..])]);
    let analyzer = AnalyzerBuilder::new().build().unwrap();
    expect_violation(analyzer.analyze_reader(Cursor::new(zip_data)), "Absolute path");
}

/// パストラバーサル攻撃のテスト: Windows形式の絶対パス
#[test]
fn test_path_traversal_windows_absolute_path() {
    let zip_data = build_zip(&[("C:\\Windows\\system32", &b"test"[..])]);
    let analyzer = AnalyzerBuilder::new().build().unwrap();
    expect_violation(analyzer.analyze_reader(Cursor::new(zip_data)), "Absolute path");
}

/// ファイルサイズ制限のテスト: 入力ファイルが大きすぎる場合
#[test]
fn test_input_file_size_limit() {
    let data = sales_export(5);
    let analyzer = AnalyzerBuilder::new()
        .with_security_config(SecurityConfig {
            max_input_file_size: (data.len() - 1) as u64,
            ..SecurityConfig::default()
        })
        .build()
        .unwrap();
    expect_violation(analyzer.analyze_reader(Cursor::new(data)), "Input file size");
}

/// 行数制限のテスト
#[test]
fn test_row_limit() {
    let analyzer = AnalyzerBuilder::new()
        .with_security_config(SecurityConfig {
            max_rows: 10,
            ..SecurityConfig::default()
        })
        .build()
        .unwrap();

    // ヘッダー + 9行 = 10行はちょうど上限
    assert!(analyzer.analyze_reader(Cursor::new(sales_export(9))).is_ok());
    expect_violation(
        analyzer.analyze_reader(Cursor::new(sales_export(10))),
        "too many rows",
    );
}

/// ZIPでもスプレッドシートでもない入力はパースエラーになる
#[test]
fn test_garbage_input_is_parse_error() {
    let analyzer = AnalyzerBuilder::new().build().unwrap();
    let result = analyzer.analyze_reader(Cursor::new(b"Denumire marfa;Cantitate".to_vec()));
    match result {
        Err(ReportError::SecurityViolation(_)) => {
            panic!("Plain text input should not trigger a security violation");
        }
        Err(_) => {}
        Ok(report) => panic!("Expected an error, got {:?}", report),
    }
}

/// 正常なファイルの処理が成功することを確認
#[test]
fn test_valid_file_processing() {
    let analyzer = AnalyzerBuilder::new().build().unwrap();
    let report = analyzer
        .analyze_reader(Cursor::new(sales_export(3)))
        .unwrap();
    assert_eq!(report.ranked_table.len(), 1);
    assert_eq!(report.ranked_table[0].total_quantity, 3.0);
    assert_eq!(report.ranked_table[0].total_amount, 75.0);
}

/// 不正なセキュリティ設定はビルド時に拒否される
#[test]
fn test_zero_limits_rejected() {
    let result = AnalyzerBuilder::new()
        .with_security_config(SecurityConfig {
            max_input_file_size: 0,
            ..SecurityConfig::default()
        })
        .build();
    assert!(matches!(result, Err(ReportError::Config(_))));
}
