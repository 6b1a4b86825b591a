use crate::analyzers::{RangeAnalyzer, RunSummary};
use crate::error::Result;
use crate::models::{DailySeries, TimeSeries};
use crate::processors::transforms::{convert_units, fill_missing, filter_from};
use crate::processors::{DataMerger, RangeReducer};
use crate::readers::{ConcurrentReader, SourceData};
use crate::settings::PipelineSettings;
use crate::utils::progress::ProgressReporter;
use crate::writers::{ChartWriter, CsvWriter};
use tracing::{info, warn};

/// Daily series produced by one run, before and after merging
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub reference: DailySeries,
    pub raw: DailySeries,
    pub merged: DailySeries,
    pub summary: RunSummary,
}

pub struct TidePipeline {
    settings: PipelineSettings,
}

impl TidePipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Load, reduce, merge, write, then plot
    pub async fn run(&self, progress: Option<&ProgressReporter>) -> Result<PipelineOutput> {
        if let Some(p) = progress {
            p.set_message("Reading station data...");
        }

        let reader = ConcurrentReader::new(self.settings.max_workers);
        let sources = reader
            .read_sources(
                &self.settings.reference_file,
                &self.settings.data_dir,
                &self.settings.raw_pattern,
            )
            .await?;

        if let Some(p) = progress {
            p.set_message("Computing daily tidal ranges...");
        }

        let output = self.process(sources)?;

        if let Some(p) = progress {
            p.set_message("Writing merged series...");
        }
        CsvWriter::new().write_series(&output.merged, &self.settings.output_file)?;

        if self.settings.plot {
            if let Some(p) = progress {
                p.set_message("Plotting comparison...");
            }
            // The chart is a diagnostic; the CSV is already on disk
            if let Err(e) = ChartWriter::new().write_comparison(
                &output.reference,
                &output.raw,
                &self.settings.plot_file,
            ) {
                warn!(
                    error = %e,
                    path = %self.settings.plot_file.display(),
                    "skipped comparison chart"
                );
            }
        }

        Ok(output)
    }

    /// The in-memory part of the pipeline, from loaded sources to the merged series
    pub fn process(&self, sources: SourceData) -> Result<PipelineOutput> {
        let reducer = RangeReducer::with_window_hours(self.settings.window_hours);
        let fill = self.settings.fill_value;

        // The reference file goes through the same rolling reduction as the raw data
        let reference = fill_missing(&reducer.reduce(&sources.reference), fill);
        info!(
            samples = sources.reference.len(),
            days = reference.len(),
            "reduced reference series"
        );

        let raw = self.reduce_raw(&sources.raw, &reducer);
        info!(
            samples = sources.raw.len(),
            days = raw.len(),
            cutoff = %self.settings.cutoff_date,
            "reduced raw series"
        );
        if raw.is_empty() {
            warn!(
                cutoff = %self.settings.cutoff_date,
                "no raw data on or after the cutoff date"
            );
        }

        let merged = DataMerger::new().merge_right_biased(&reference, &raw);

        let summary = RangeAnalyzer::new(fill).summarize_run(
            &reference,
            &raw,
            &merged,
            sources.raw_files.len(),
        );

        Ok(PipelineOutput {
            reference,
            raw,
            merged,
            summary,
        })
    }

    fn reduce_raw(&self, raw: &TimeSeries, reducer: &RangeReducer) -> DailySeries {
        let feet = convert_units(raw, self.settings.unit_factor);
        let daily = fill_missing(&reducer.reduce(&feet), self.settings.fill_value);
        filter_from(&daily, self.settings.cutoff_date)
    }
}
