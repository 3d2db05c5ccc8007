use clap::{ArgAction, Parser};
use std::path::PathBuf;

use coordclean::{Check, EqualMode};

#[derive(Parser)]
#[command(
    name = "coordclean",
    version,
    about = "Flag suspicious coordinates in occurrence CSVs"
)]
pub struct CliArgs {
    /// Input CSV file (input directory with --batch)
    pub input: Option<PathBuf>,

    /// Output CSV file (output directory with --batch)
    pub output: Option<PathBuf>,

    /// JSON file with cleaning parameters; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma-separated checks to run (default: seas,zeros,equal,centroids)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub checks: Option<Vec<Check>>,

    /// How the `equal` check compares latitude and longitude
    #[arg(long, value_enum)]
    pub equal_mode: Option<EqualMode>,

    /// Also write one cc_* column per check
    #[arg(long, default_value_t = false)]
    pub flags: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Batch mode: clean every *.csv in INPUT into the OUTPUT directory
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
