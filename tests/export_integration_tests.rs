//! Integration tests for export functionality
//!
//! Tests the export layer across different scenarios:
//! - Separate output next to each input or in an output directory
//! - Merged output across several inputs
//! - Per-file failures in separate mode vs. aborting in merged mode
//! - Text encoding of the written table

use bin_telemetry::export::*;
use bin_telemetry::{encode_timestamp_words, DecodeConfig, DecodeError, TextEncoding, Timestamp};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Small layout: no preamble, 1-word first block (sentinel only), 4-word
/// blocks of one group each: date, time, two measurements
fn small_config() -> DecodeConfig {
    DecodeConfig {
        offset: 0,
        initial_block_words: 1,
        subsequent_block_words: 4,
        time_word_indices: (0, 1),
        float_start_index: 2,
        group_size: 4,
        skip_first_group_item: false,
        header_names: vec!["Date".into(), "Time".into(), "P/mbar".into(), "T/°C".into()],
        text_encoding: TextEncoding::Utf8,
    }
}

fn write_log(dir: &Path, name: &str, samples: &[(u8, u8, f32)]) -> PathBuf {
    let mut words = vec![0xFFFF_FFFFu32];
    for &(minute, second, value) in samples {
        let (date, time) = encode_timestamp_words(&Timestamp {
            year: 2025,
            month: 1,
            day: 10,
            hour: 13,
            minute,
            second,
        });
        words.extend([date, time, value.to_bits().swap_bytes(), 0]);
    }
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
    let path = dir.join(name);
    fs::write(&path, bytes).expect("Failed to write test log");
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read CSV")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_separate_export_next_to_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_log(temp_dir.path(), "run1.bin", &[(30, 45, 1.5), (30, 40, 2.25)]);

    let reports = export_separate(&[input], &small_config(), &ExportOptions::default());
    assert_eq!(reports.len(), 1);
    let output = reports[0].outcome.as_ref().expect("export should succeed");
    assert_eq!(output, &temp_dir.path().join("run1.csv"));

    assert_eq!(
        read_lines(output),
        [
            "Date,Time,P/mbar,T/°C",
            "2025/1/10,13:30:40,2.25,0.0",
            "2025/1/10,13:30:45,1.5,0.0",
        ]
    );
}

#[test]
fn test_separate_export_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_log(temp_dir.path(), "run2.bin", &[(0, 0, 1.0)]);
    let output_dir = temp_dir.path().join("nonexistent").join("output");

    let options = ExportOptions {
        output_dir: Some(output_dir.to_str().unwrap().to_string()),
    };
    let reports = export_separate(&[input], &small_config(), &options);
    assert!(reports[0].is_ok());
    assert!(output_dir.join("run2.csv").exists(), "CSV should be created in new directory");
}

#[test]
fn test_separate_export_continues_after_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing.bin");
    let good = write_log(temp_dir.path(), "good.bin", &[(1, 1, 3.0)]);

    let reports = export_separate(
        &[missing.clone(), good],
        &small_config(),
        &ExportOptions::default(),
    );
    assert_eq!(reports.len(), 2);
    assert!(!reports[0].is_ok());
    assert_eq!(reports[0].input, missing);
    match reports[0].outcome.as_ref().unwrap_err() {
        DecodeError::File { path, .. } => assert_eq!(path, &missing),
        other => panic!("expected File error, got {other:?}"),
    }
    assert!(reports[1].is_ok());
    assert!(temp_dir.path().join("good.csv").exists());
}

#[test]
fn test_merged_export_sorts_and_dedups_across_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let a = write_log(temp_dir.path(), "a.bin", &[(10, 0, 1.0), (5, 0, 2.0)]);
    let b = write_log(temp_dir.path(), "b.bin", &[(10, 0, 9.0), (7, 30, 3.0)]);
    let merged = temp_dir.path().join("merged.csv");

    let written = export_merged(&[a, b], &small_config(), &merged).expect("merge should succeed");
    assert_eq!(written, merged);
    assert_eq!(
        read_lines(&merged),
        [
            "Date,Time,P/mbar,T/°C",
            "2025/1/10,13:05:00,2.0,0.0",
            "2025/1/10,13:07:30,3.0,0.0",
            "2025/1/10,13:10:00,1.0,0.0",
        ]
    );
}

#[test]
fn test_merged_export_aborts_on_any_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let good = write_log(temp_dir.path(), "good.bin", &[(0, 0, 1.0)]);
    let missing = temp_dir.path().join("missing.bin");
    let merged = temp_dir.path().join("merged.csv");

    let err = export_merged(&[good, missing.clone()], &small_config(), &merged).unwrap_err();
    match err {
        DecodeError::File { path, .. } => assert_eq!(path, missing),
        other => panic!("expected File error, got {other:?}"),
    }
    assert!(!merged.exists(), "No partial merged output should be written");
}

#[test]
fn test_ansi_export_writes_single_byte_text() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_log(temp_dir.path(), "ansi.bin", &[(0, 0, 1.0)]);
    let config = DecodeConfig {
        text_encoding: TextEncoding::Ansi,
        ..small_config()
    };

    let reports = export_separate(&[input], &config, &ExportOptions::default());
    let output = reports[0].outcome.as_ref().expect("export should succeed");
    let bytes = fs::read(output).unwrap();
    assert!(bytes.starts_with(b"Date,Time,P/mbar,T/\xB0C\r\n"));
}

#[test]
fn test_ansi_export_unrepresentable_header_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_log(temp_dir.path(), "ohm.bin", &[(0, 0, 1.0)]);
    let config = DecodeConfig {
        header_names: vec!["Date".into(), "Time".into(), "R/mΩ".into()],
        text_encoding: TextEncoding::Ansi,
        ..small_config()
    };

    let reports = export_separate(&[input], &config, &ExportOptions::default());
    let err = reports[0].outcome.as_ref().unwrap_err();
    assert!(matches!(err.root(), DecodeError::Encoding(_)));
    assert!(!temp_dir.path().join("ohm.csv").exists());
}

#[test]
fn test_empty_log_writes_header_only() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = write_log(temp_dir.path(), "empty.bin", &[]);

    let reports = export_separate(&[input], &small_config(), &ExportOptions::default());
    let output = reports[0].outcome.as_ref().expect("export should succeed");
    assert_eq!(read_lines(output), ["Date,Time,P/mbar,T/°C"]);
}

#[test]
fn test_export_options_defaults() {
    let opts = ExportOptions::default();
    assert!(opts.output_dir.is_none(), "Default output_dir should be None");
}
