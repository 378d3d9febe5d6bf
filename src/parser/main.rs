use crate::error::{DecodeError, Result};
use crate::parser::group::extract_records;
use crate::parser::stream::BlockReader;
use crate::types::{DecodeConfig, Record};
use std::path::Path;
use tracing::{debug, info};

/// Counters for one decoded log
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub total_bytes: usize,
    pub blocks: usize,
    pub groups: usize,
    pub records: usize,
    pub bad_timestamps: usize,
    pub short_groups: usize,
    pub partial_tails: usize,
}

/// Decode a device log file into records in stream order
pub fn parse_bin_file(file_path: &Path, config: &DecodeConfig) -> Result<Vec<Record>> {
    parse_bin_file_with_stats(file_path, config).map(|(records, _)| records)
}

/// Decode a device log file, also returning decode counters
pub fn parse_bin_file_with_stats(
    file_path: &Path,
    config: &DecodeConfig,
) -> Result<(Vec<Record>, ParseStats)> {
    config.validate()?;

    let file_data = std::fs::read(file_path).map_err(|e| DecodeError::from(e).in_file(file_path))?;
    debug!(
        "Read {} bytes ({:.2} MB) from {}",
        file_data.len(),
        file_data.len() as f64 / 1024.0 / 1024.0,
        file_path.display()
    );

    let (records, stats) = parse_bin_bytes_with_stats(&file_data, config)?;
    info!(
        "{}: {} records from {} blocks ({} groups skipped for bad timestamps)",
        file_path.display(),
        stats.records,
        stats.blocks,
        stats.bad_timestamps
    );
    Ok((records, stats))
}

/// Decode an in-memory device log into records in stream order
pub fn parse_bin_bytes(data: &[u8], config: &DecodeConfig) -> Result<Vec<Record>> {
    parse_bin_bytes_with_stats(data, config).map(|(records, _)| records)
}

/// Decode an in-memory device log, also returning decode counters
pub fn parse_bin_bytes_with_stats(
    data: &[u8],
    config: &DecodeConfig,
) -> Result<(Vec<Record>, ParseStats)> {
    config.validate()?;

    let mut stats = ParseStats {
        total_bytes: data.len(),
        ..ParseStats::default()
    };
    let mut records = Vec::new();

    let blocks = BlockReader::new(
        data,
        config.offset,
        config.initial_block_words,
        config.subsequent_block_words,
    );
    for block in blocks {
        let block_stats = extract_records(&block, config, &mut records);
        stats.blocks += 1;
        stats.groups += block_stats.groups;
        stats.records += block_stats.records;
        stats.bad_timestamps += block_stats.bad_timestamps;
        stats.short_groups += block_stats.too_short;
        if block_stats.partial_tail {
            stats.partial_tails += 1;
        }
    }

    Ok((records, stats))
}
