use anyhow::{Context, Result};
use log::{error, info, warn};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::CleanArgs;
use crate::common::{format_elapsed, setup_logging, CleanStats};
use crate::output::{write_csv, write_json};
use crate::pipeline::{process_folder, FileExchange, NoopExchange, RunConfig};
use crate::whitelist::load_whitelist;

pub fn run_clean(args: CleanArgs) -> Result<CleanStats> {
    let config = RunConfig {
        ids_csv: PathBuf::from(&args.ids),
        input_dir: PathBuf::from(&args.input),
        output_json: PathBuf::from(&args.output_json),
        output_csv: PathBuf::from(&args.output_csv),
    };

    setup_logging(&args.log_level)?;

    run_with_exchange(config, &NoopExchange)
}

/// Run the full clean: load whitelist -> folder pass -> JSON + CSV outputs.
///
/// Precondition failures (unreadable reference table, missing input folder)
/// and degenerate outcomes (empty whitelist, no records kept) are reported
/// and end the run without writing output files; none of them is an error
/// to the caller.
pub fn run_with_exchange(config: RunConfig, exchange: &dyn FileExchange) -> Result<CleanStats> {
    let start_time = Instant::now();
    let mut stats = CleanStats::default();

    info!("Starting corpus metadata clean");
    info!("Reference table: {}", config.ids_csv.display());
    info!("Input folder: {}", config.input_dir.display());
    info!("Output JSON: {}", config.output_json.display());
    info!("Output CSV: {}", config.output_csv.display());

    exchange
        .prompt_for_input()
        .context("Input staging failed")?;

    let valid_ids = load_whitelist(&config.ids_csv);
    stats.whitelist_ids = valid_ids.len();

    if valid_ids.is_empty() {
        error!("No valid IDs were loaded from the reference table. Exiting.");
        return Ok(stats);
    }
    info!("Loaded {} whitelisted IDs", valid_ids.len());

    if !config.input_dir.is_dir() {
        // Create the missing folder as a courtesy, then abort.
        error!(
            "The folder {} does not exist. Please provide a valid folder path.",
            config.input_dir.display()
        );
        fs::create_dir_all(&config.input_dir).with_context(|| {
            format!("Failed to create input folder: {}", config.input_dir.display())
        })?;
        return Ok(stats);
    }

    let cleaned = process_folder(&config.input_dir, &valid_ids, &mut stats)?;

    if cleaned.is_empty() {
        warn!("No cleaned data was generated.");
        return Ok(stats);
    }

    write_json(&cleaned, &config.output_json)?;
    exchange.offer_download(&config.output_json)?;

    write_csv(&cleaned, &config.output_csv)?;
    exchange.offer_download(&config.output_csv)?;

    let total_time = start_time.elapsed();

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("Whitelisted IDs: {}", stats.whitelist_ids);
    info!("JSON files seen: {}", stats.files_seen);
    info!("Records kept: {}", stats.records_kept);
    info!("Files skipped with errors: {}", stats.files_failed);
    info!("Output JSON: {}", config.output_json.display());
    info!("Output CSV: {}", config.output_csv.display());
    info!("========================================================");

    Ok(stats)
}
