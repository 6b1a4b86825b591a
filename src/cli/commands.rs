use crate::analyzers::RangeAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::processors::TidePipeline;
use crate::readers::RangeTableReader;
use crate::settings::{PipelineSettings, SettingsOverrides};
use crate::utils::constants::OUTPUT_DATE_FORMAT;
use crate::utils::progress::ProgressReporter;
use chrono::Duration;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, Level};

/// Install the global tracing subscriber.
///
/// Console output is kept to warnings unless verbose; a log file records
/// INFO and up.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = match (verbose, log_file.is_some()) {
        (true, _) => Level::DEBUG,
        (false, true) => Level::INFO,
        (false, false) => Level::WARN,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| ProcessingError::Config(format!("Logging setup failed: {}", e)))
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.verbose {
        println!("Verbose logging enabled");
    }

    match cli.command {
        Commands::Process {
            reference,
            raw_pattern,
            data_dir,
            output_file,
            plot_file,
            no_plot,
            cutoff,
            fill_value,
            window_hours,
            max_workers,
            summary_json,
        } => {
            let settings = PipelineSettings::load(cli.config.as_deref())?.with_overrides(
                SettingsOverrides {
                    reference_file: reference,
                    data_dir,
                    raw_pattern,
                    output_file,
                    plot_file,
                    no_plot,
                    cutoff_date: cutoff,
                    fill_value,
                    window_hours,
                    max_workers,
                },
            );
            settings.check()?;

            println!("Processing daily tidal ranges...");
            println!("Reference file: {}", settings.reference_file.display());
            println!(
                "Raw files: {}",
                settings.data_dir.join(&settings.raw_pattern).display()
            );
            println!("Output file: {}", settings.output_file.display());
            info!(?settings, "starting pipeline run");

            let progress = ProgressReporter::new_spinner("Processing data...", cli.verbose);

            let pipeline = TidePipeline::new(settings);
            let output = pipeline.run(Some(&progress)).await?;

            progress.finish_with_message(&format!(
                "Processed {} days",
                output.merged.len()
            ));

            println!("\n{}", output.summary.summary());

            if pipeline.settings().plot {
                println!(
                    "\nComparison chart: {}",
                    pipeline.settings().plot_file.display()
                );
            }

            if let Some(path) = summary_json {
                let json = serde_json::to_string_pretty(&output.summary)?;
                fs::write(&path, json)?;
                println!("Run summary: {}", path.display());
            }

            println!("Processing complete!");
        }

        Commands::Info { file, fill_value } => {
            println!("Analyzing daily range file: {}", file.display());

            let series = RangeTableReader::new().read_daily(&file)?;
            let stats = RangeAnalyzer::new(fill_value).analyze(&series);

            println!("\n{}", stats.summary());
        }

        Commands::Lookup { file, start, days } => {
            let table = RangeTableReader::new().read_table(&file)?;
            let values = table.slice(start, days)?;

            for (offset, value) in values.iter().enumerate() {
                let date = start + Duration::days(offset as i64);
                println!("{},{:.2}", date.format(OUTPUT_DATE_FORMAT), value);
            }
        }
    }

    Ok(())
}
