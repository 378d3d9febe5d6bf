//! Merge Export Example
//!
//! Decodes several device logs and writes them into one CSV, sorted by
//! timestamp with duplicate samples removed.
//!
//! Usage: merge_export <output.csv> <input.bin>...

use bin_telemetry::{export_merged, parse_bin_file_with_stats, DecodeConfig};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| {
        println!("Usage: merge_export <output.csv> <input.bin>...");
        std::process::exit(1);
    });
    let inputs: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if inputs.is_empty() {
        println!("No input files given.");
        std::process::exit(1);
    }

    let config = DecodeConfig::default();

    for input in &inputs {
        let (_, stats) = parse_bin_file_with_stats(input, &config)?;
        println!(
            "{}: {} records in {} blocks, {} groups with bad timestamps",
            input.display(),
            stats.records,
            stats.blocks,
            stats.bad_timestamps
        );
    }

    let written = export_merged(&inputs, &config, Path::new(&output))?;
    println!("✓ Merged CSV written to {}", written.display());

    Ok(())
}
