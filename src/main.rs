//! CLI binary for the telemetry decoder
//!
//! This provides the command-line interface for the decoding library.

use anyhow::{Context, Result};
use bin_telemetry::{
    export_merged, export_separate, load_config, parse_offset, parse_time_indices, DecodeConfig,
    ExportOptions, TextEncoding,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use glob::glob;
use std::path::{Path, PathBuf};

const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

fn build_command() -> Command {
    Command::new("bin_telemetry")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode binary process telemetry logs (.bin) into CSV tables.")
        .arg(
            Arg::new("files")
                .help("Log files to decode (.bin extension, case-insensitive, supports globbing)")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed decoding information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for per-file CSV output (default: same as input file)")
                .value_name("DIR")
                .conflicts_with("merge"),
        )
        .arg(
            Arg::new("merge")
                .long("merge")
                .help("Decode all inputs into a single CSV file instead of one per input")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON file with decode settings; individual flags below override it")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .help("Byte offset of the first block, hexadecimal (default: C0)")
                .value_name("HEX"),
        )
        .arg(
            Arg::new("initial-words")
                .long("initial-words")
                .help("Words in the first block, including its leading sentinel (default: 33)")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("subsequent-words")
                .long("subsequent-words")
                .help("Words in each following block (default: 32)")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("time-indices")
                .long("time-indices")
                .help("Positions of the two timestamp words within a group (default: 0,1)")
                .value_name("A,B"),
        )
        .arg(
            Arg::new("float-start")
                .long("float-start")
                .help("First position within a group holding a measurement (default: 2)")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("group-size")
                .long("group-size")
                .help("Words per group (default: 16)")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("keep-first-item")
                .long("keep-first-item")
                .help("Do not drop the first word of every group")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("headers")
                .long("headers")
                .help("Comma-separated CSV column labels, date and time first")
                .value_name("LIST"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .help("CSV text encoding: ANSI (Windows-1252) or UTF-8 (default: UTF-8)")
                .value_name("ENC"),
        )
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Start from the config file (or defaults) and apply flag overrides
fn build_config(matches: &ArgMatches) -> Result<DecodeConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => load_config(Path::new(path))
            .with_context(|| format!("Failed to load config file: {path}"))?,
        None => DecodeConfig::default(),
    };

    if let Some(offset) = matches.get_one::<String>("offset") {
        config.offset = parse_offset(offset)?;
    }
    if let Some(&words) = matches.get_one::<usize>("initial-words") {
        config.initial_block_words = words;
    }
    if let Some(&words) = matches.get_one::<usize>("subsequent-words") {
        config.subsequent_block_words = words;
    }
    if let Some(indices) = matches.get_one::<String>("time-indices") {
        config.time_word_indices = parse_time_indices(indices)?;
    }
    if let Some(&start) = matches.get_one::<usize>("float-start") {
        config.float_start_index = start;
    }
    if let Some(&size) = matches.get_one::<usize>("group-size") {
        config.group_size = size;
    }
    if matches.get_flag("keep-first-item") {
        config.skip_first_group_item = false;
    }
    if let Some(headers) = matches.get_one::<String>("headers") {
        config.header_names = headers.split(',').map(|h| h.trim().to_string()).collect();
    }
    if let Some(encoding) = matches.get_one::<String>("encoding") {
        config.text_encoding = encoding.parse::<TextEncoding>()?;
    }

    config.validate()?;
    Ok(config)
}

/// Expand glob patterns and keep existing `.bin` files
fn collect_input_paths(file_patterns: &[&String], debug: bool) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();
    for pattern in file_patterns {
        if debug {
            println!("Processing pattern: {pattern}");
        }

        let paths: Vec<_> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        if debug {
                            println!("Glob pattern '{pattern}' matched {} files", paths.len());
                        }
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![PathBuf::from(pattern.as_str())]
        };

        for path in paths {
            if !path.is_file() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("bin"))
                .unwrap_or(false);

            if !valid_extension {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            valid_paths.push(path);
        }
    }
    valid_paths
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();
    let debug = matches.get_flag("debug");
    init_logging(debug);

    let file_patterns: Vec<&String> = match matches.get_many::<String>("files") {
        Some(files) => files.collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let config = build_config(&matches)?;
    if debug {
        println!("bin_telemetry {} ({GIT_SHA})", env!("CARGO_PKG_VERSION"));
        println!("Decode configuration: {config:?}");
    }

    let valid_paths = collect_input_paths(&file_patterns, debug);
    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extension: .bin (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    if let Some(merge_path) = matches.get_one::<String>("merge") {
        println!("Merging {} file(s) into {merge_path}", valid_paths.len());
        let output = export_merged(&valid_paths, &config, Path::new(merge_path))
            .context("Merged export failed; no output was written")?;
        println!("Exported merged data to: {}", output.display());
        return Ok(());
    }

    let export_options = ExportOptions {
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };

    let mut processed_files = 0;
    for path in &valid_paths {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        let report = export_separate(std::slice::from_ref(path), &config, &export_options)
            .pop()
            .context("no report produced")?;
        match report.outcome {
            Ok(output) => {
                println!("Exported data to: {}", output.display());
                processed_files += 1;
            }
            Err(e) => {
                eprintln!("Error processing {filename}: {e}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}
