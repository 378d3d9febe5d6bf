use crate::parser::timestamp::{decode_timestamp, hex_text, ZERO_WORD_HEX};
use crate::parser::word::decode_word;
use crate::types::{DecodeConfig, Record};
use tracing::{debug, trace};

/// Per-block extraction counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GroupStats {
    pub groups: usize,
    pub records: usize,
    pub too_short: usize,
    pub bad_timestamps: usize,
    pub partial_tail: bool,
}

/// Decode one group into a record, or `None` when the group is skipped.
///
/// A time index beyond the end of the group reads as the zero word, which
/// never decodes to a valid timestamp.
pub fn extract_record(
    group: &[u32],
    config: &DecodeConfig,
    stats: &mut GroupStats,
) -> Option<Record> {
    let group = if config.skip_first_group_item {
        group.get(1..).unwrap_or(&[])
    } else {
        group
    };

    if group.len() < 2 {
        stats.too_short += 1;
        return None;
    }

    let (date_index, time_index) = config.time_word_indices;
    let time_field = |index: usize| {
        group
            .get(index)
            .map(|&word| hex_text(word))
            .unwrap_or_else(|| ZERO_WORD_HEX.to_string())
    };
    let date_hex = time_field(date_index);
    let time_hex = time_field(time_index);

    let timestamp = match decode_timestamp(&date_hex, &time_hex) {
        Ok(ts) => ts,
        Err(err) => {
            trace!("Skipping group {date_hex} {time_hex}: {err}");
            stats.bad_timestamps += 1;
            return None;
        }
    };

    let measurements = group
        .get(config.float_start_index..)
        .unwrap_or(&[])
        .iter()
        .map(|&word| decode_word(word))
        .collect();

    stats.records += 1;
    Some(Record::new(timestamp, measurements))
}

/// Split a block into groups of `group_size` words and decode each.
///
/// A trailing group shorter than `group_size` is dropped; the next block is
/// still read.
pub fn extract_records(block: &[u32], config: &DecodeConfig, out: &mut Vec<Record>) -> GroupStats {
    let mut stats = GroupStats::default();
    if config.group_size == 0 {
        return stats;
    }

    for group in block.chunks(config.group_size) {
        if group.len() < config.group_size {
            stats.partial_tail = true;
            break;
        }
        stats.groups += 1;
        if let Some(record) = extract_record(group, config, &mut stats) {
            out.push(record);
        }
    }

    debug!(
        "Block of {} words: {} groups, {} records, {} bad timestamps",
        block.len(),
        stats.groups,
        stats.records,
        stats.bad_timestamps
    );
    stats
}
