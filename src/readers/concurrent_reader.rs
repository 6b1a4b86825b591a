use crate::error::{ProcessingError, Result};
use crate::models::TimeSeries;
use crate::readers::{RawReader, ReferenceReader};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::info;

/// Both inputs of a pipeline run, as loaded from disk
#[derive(Debug, Clone)]
pub struct SourceData {
    pub reference: TimeSeries,
    pub raw: TimeSeries,
    pub raw_files: Vec<PathBuf>,
}

pub struct ConcurrentReader {
    max_workers: usize,
}

impl ConcurrentReader {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Read the reference file and every raw file matching `raw_pattern` concurrently.
    ///
    /// Reference errors are reported ahead of raw file errors.
    pub async fn read_sources(
        &self,
        reference_path: &Path,
        data_dir: &Path,
        raw_pattern: &str,
    ) -> Result<SourceData> {
        let reference_path = reference_path.to_path_buf();
        let reference_handle: JoinHandle<Result<TimeSeries>> =
            tokio::task::spawn_blocking(move || ReferenceReader::new().read_series(&reference_path));

        // A reference failure takes precedence over an empty raw match
        let raw_files = match RawReader::new().find_files(data_dir, raw_pattern) {
            Ok(files) => files,
            Err(e) => {
                reference_handle.await??;
                return Err(e);
            }
        };
        info!(
            pattern = raw_pattern,
            files = raw_files.len(),
            "matched raw station files"
        );

        let files = raw_files.clone();
        let max_workers = self.max_workers;
        let raw_handle: JoinHandle<Result<TimeSeries>> =
            tokio::task::spawn_blocking(move || Self::read_raw_files(&files, max_workers));

        // Wait for both reads to complete
        let (reference, raw) = tokio::try_join!(reference_handle, raw_handle)?;

        Ok(SourceData {
            reference: reference?,
            raw: raw?,
            raw_files,
        })
    }

    /// Read raw files in parallel; later files take precedence on shared timestamps
    pub fn read_raw_files(files: &[PathBuf], max_workers: usize) -> Result<TimeSeries> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_workers.max(1))
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        // Collect keeps input order, so precedence follows the sorted file list
        let parts: Vec<TimeSeries> = pool.install(|| {
            files
                .par_iter()
                .map(|path| RawReader::new().read_series(path))
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(TimeSeries::concat(parts))
    }
}
