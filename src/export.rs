//! Export functionality for decoded telemetry
//!
//! Contains the table writer and the two batch modes: one CSV per input log,
//! or a single CSV merged from all inputs.

use crate::conversion::{encode_text, format_measurement};
use crate::error::{DecodeError, Result};
use crate::normalize::normalize_records;
use crate::parser::parse_bin_file;
use crate::types::{DecodeConfig, Record};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Export options for controlling where output goes
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Directory for per-file output (default: next to each input)
    pub output_dir: Option<String>,
}

/// Outcome of one input in separate-output mode
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: Result<PathBuf>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Output path for an input log: its stem with a `.csv` extension
pub fn compute_export_path(input_path: &Path, export_options: &ExportOptions) -> PathBuf {
    let output_dir = match export_options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => input_path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let file_name = match input_path.file_stem() {
        Some(stem) => {
            let mut name = stem.to_os_string();
            name.push(".csv");
            name
        }
        None => "telemetry.csv".into(),
    };
    output_dir.join(file_name)
}

/// Render normalized records as table bytes in the configured encoding.
///
/// First row is the header names verbatim, then one row per record:
/// date, time, measurements. Header and row widths are independent.
pub fn render_table(records: &[Record], config: &DecodeConfig) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(&config.header_names)?;
    for record in records {
        let mut row = Vec::with_capacity(record.measurements.len() + 2);
        row.push(record.date_text.clone());
        row.push(record.time_text.clone());
        row.extend(record.measurements.iter().map(|&v| format_measurement(v)));
        writer.write_record(&row)?;
    }

    let utf8 = writer
        .into_inner()
        .map_err(|e| DecodeError::Io(e.into_error()))?;
    let text = String::from_utf8(utf8)
        .map_err(|e| DecodeError::Encoding(format!("generated table is not UTF-8: {e}")))?;
    encode_text(&text, config.text_encoding)
}

/// Write normalized records as a table to any writer
pub fn write_table<W: Write>(
    mut writer: W,
    records: &[Record],
    config: &DecodeConfig,
) -> Result<()> {
    let bytes = render_table(records, config)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Normalize records and write them to `output_path`.
///
/// The file is only created once the whole table has been encoded, so an
/// encoding failure leaves nothing behind.
pub fn export_to_csv(
    output_path: &Path,
    records: Vec<Record>,
    config: &DecodeConfig,
) -> Result<PathBuf> {
    let records = normalize_records(records);
    let bytes = render_table(&records, config).map_err(|e| e.in_file(output_path))?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| DecodeError::from(e).in_file(parent))?;
            debug!("Created output directory: {parent:?}");
        }
    }

    std::fs::write(output_path, &bytes).map_err(|e| DecodeError::from(e).in_file(output_path))?;
    info!("Wrote {} rows to {}", records.len(), output_path.display());
    Ok(output_path.to_path_buf())
}

/// Decode each input and write it to its own table.
///
/// Every input gets a report; one failing file does not stop the rest.
pub fn export_separate<P: AsRef<Path>>(
    input_paths: &[P],
    config: &DecodeConfig,
    export_options: &ExportOptions,
) -> Vec<FileReport> {
    input_paths
        .iter()
        .map(|input| {
            let input = input.as_ref();
            let outcome = parse_bin_file(input, config)
                .map_err(|e| e.in_file(input))
                .and_then(|records| {
                    let output_path = compute_export_path(input, export_options);
                    export_to_csv(&output_path, records, config)
                });
            if let Err(ref e) = outcome {
                warn!("Failed to export {}: {}", input.display(), e);
            }
            FileReport {
                input: input.to_path_buf(),
                outcome,
            }
        })
        .collect()
}

/// Decode all inputs into one table at `output_path`.
///
/// Records from every input are normalized together. Any input failing to
/// decode aborts the merge before anything is written.
pub fn export_merged<P: AsRef<Path>>(
    input_paths: &[P],
    config: &DecodeConfig,
    output_path: &Path,
) -> Result<PathBuf> {
    config.validate()?;

    let mut merged = Vec::new();
    for input in input_paths {
        let input = input.as_ref();
        let records = parse_bin_file(input, config).map_err(|e| e.in_file(input))?;
        debug!("{}: {} records merged", input.display(), records.len());
        merged.extend(records);
    }

    export_to_csv(output_path, merged, config)
}
