//! Binary Telemetry Decoder Library
//!
//! A Rust library for decoding fixed-layout binary telemetry logs written by
//! industrial process equipment (pressure, temperature, power and flow
//! sensors) into sorted, deduplicated CSV tables.
//!
//! # Features
//!
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Load [`DecodeConfig`] from JSON files
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Decode one log and write it next to the input:
//! ```rust,no_run
//! use bin_telemetry::{export_separate, DecodeConfig, ExportOptions};
//! use std::path::PathBuf;
//!
//! let config = DecodeConfig::default();
//! let reports = export_separate(&[PathBuf::from("run7.bin")], &config, &ExportOptions::default());
//! for report in reports {
//!     match report.outcome {
//!         Ok(path) => println!("Exported to: {}", path.display()),
//!         Err(e) => eprintln!("{}: {}", report.input.display(), e),
//!     }
//! }
//! ```
//!
//! Access decoded records directly:
//! ```rust,no_run
//! use bin_telemetry::{normalize_records, parse_bin_file, DecodeConfig};
//! use std::path::Path;
//!
//! let records = parse_bin_file(Path::new("run7.bin"), &DecodeConfig::default()).unwrap();
//! for record in normalize_records(records) {
//!     println!("{} {} {:?}", record.date_text, record.time_text, record.measurements);
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_bin_file`] - Decode a log file into records
//! - [`parse_bin_bytes`] - Decode log data from memory
//! - [`BlockReader`] - Block framing over raw log bytes
//! - [`decode_timestamp`] - BCD-style timestamp decode
//! - [`decode_word`] - Byte-reversed float decode
//!
//! ## Normalization
//! - [`normalize_records`] - Sort, dedup and column correction
//! - [`sort_and_dedup`] - Timestamp ordering only
//!
//! ## Export Functions
//! - [`export_separate`] - One CSV per input log
//! - [`export_merged`] - One CSV for all inputs
//! - [`write_table`] - Write records to any writer
//! - [`compute_export_path`] - Output path for an input log

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod normalize;
pub mod parser;
pub mod types;

pub use conversion::*;
pub use error::*;
pub use export::*;
pub use normalize::*;
pub use parser::*;
pub use types::*;
