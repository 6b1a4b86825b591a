use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sftide")]
#[command(about = "Daily tidal range processor for San Francisco stage data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: sftide.toml when present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute, compare and merge daily tidal ranges into one CSV file
    Process {
        #[arg(long, help = "Reference stage file [default: sf_stage_noaa_screened.csv]")]
        reference: Option<PathBuf>,

        #[arg(long, help = "Raw file glob [default: noaa_sffpx_*elev*.csv]")]
        raw_pattern: Option<String>,

        #[arg(long, help = "Directory searched for raw files [default: .]")]
        data_dir: Option<PathBuf>,

        #[arg(short, long, help = "Output CSV path [default: sftide.csv]")]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Comparison chart path [default: sftide_compare.svg]")]
        plot_file: Option<PathBuf>,

        #[arg(long, help = "Skip the comparison chart")]
        no_plot: bool,

        #[arg(long, help = "First day of raw data kept [default: 2017-01-02]")]
        cutoff: Option<NaiveDate>,

        #[arg(long, help = "Tidal range used for missing days, feet [default: 6.0]")]
        fill_value: Option<f64>,

        #[arg(long, help = "Rolling window length in hours [default: 25]")]
        window_hours: Option<f64>,

        #[arg(long, help = "Parallel raw file readers [default: number of CPUs]")]
        max_workers: Option<usize>,

        #[arg(long, help = "Write the run summary as JSON to this path")]
        summary_json: Option<PathBuf>,
    },

    /// Display statistics for a daily range CSV file
    Info {
        #[arg(short, long, default_value = "sftide.csv")]
        file: PathBuf,

        #[arg(long, default_value = "6.0", help = "Fill value counted in the report")]
        fill_value: f64,
    },

    /// Print consecutive daily ranges starting at a date
    Lookup {
        #[arg(short, long, default_value = "sftide.csv")]
        file: PathBuf,

        #[arg(short, long, help = "First day (YYYY-MM-DD)")]
        start: NaiveDate,

        #[arg(short, long, default_value = "1")]
        days: usize,
    },
}
