use clap::Parser;

#[derive(Parser, Clone)]
#[command(name = "corpus-metadata-cleaner")]
#[command(about = "Filter a folder of document metadata JSON against an ID whitelist and emit cleaned JSON + CSV")]
#[command(version = "1.0.0")]
pub struct CleanArgs {
    /// Reference CSV with whitelisted document IDs in the first column (no header row)
    #[arg(long, default_value = "os-ccby-40k-ids.csv")]
    pub ids: String,

    /// Folder of per-document JSON files
    #[arg(short, long, default_value = "train_data")]
    pub input: String,

    /// Output JSON file (array of cleaned records)
    #[arg(long, default_value = "cleaned_data.json")]
    pub output_json: String,

    /// Output CSV file (flattened records)
    #[arg(long, default_value = "cleaned_data.csv")]
    pub output_csv: String,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
