use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_FILL_RANGE, ENV_PREFIX, M2FT, OUTPUT_FILE, PLOT_FILE, RANGE_WINDOW_HOURS,
    RAW_CUTOFF_DATE, RAW_FILE_PATTERN, REFERENCE_FILE, SETTINGS_FILE,
};
use chrono::NaiveDate;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Parameters of a pipeline run.
///
/// Defaults reproduce the fixed San Francisco setup; a `sftide.toml` file and
/// `SFTIDE_*` environment variables may override them, command line flags
/// override everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PipelineSettings {
    pub reference_file: PathBuf,

    pub data_dir: PathBuf,

    #[validate(length(min = 1))]
    pub raw_pattern: String,

    pub output_file: PathBuf,

    pub plot: bool,

    pub plot_file: PathBuf,

    pub cutoff_date: NaiveDate,

    #[validate(range(min = 0.0))]
    pub fill_value: f64,

    // Roughly one second, the resolution of the rolling window
    #[validate(range(min = 0.000278, max = 240.0))]
    pub window_hours: f64,

    #[validate(range(exclusive_min = 0.0))]
    pub unit_factor: f64,

    #[validate(range(min = 1))]
    pub max_workers: usize,
}

/// Values given on the command line; `None` leaves the setting alone
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub reference_file: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub raw_pattern: Option<String>,
    pub output_file: Option<PathBuf>,
    pub plot_file: Option<PathBuf>,
    pub no_plot: bool,
    pub cutoff_date: Option<NaiveDate>,
    pub fill_value: Option<f64>,
    pub window_hours: Option<f64>,
    pub max_workers: Option<usize>,
}

impl PipelineSettings {
    /// Load defaults, then the settings file, then the environment.
    ///
    /// An explicit `config_file` must exist; the default `sftide.toml` is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(
            config_file,
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn load_with_env(config_file: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("reference_file", REFERENCE_FILE)?
            .set_default("data_dir", ".")?
            .set_default("raw_pattern", RAW_FILE_PATTERN)?
            .set_default("output_file", OUTPUT_FILE)?
            .set_default("plot", true)?
            .set_default("plot_file", PLOT_FILE)?
            .set_default("cutoff_date", RAW_CUTOFF_DATE)?
            .set_default("fill_value", DEFAULT_FILL_RANGE)?
            .set_default("window_hours", RANGE_WINDOW_HOURS)?
            .set_default("unit_factor", M2FT)?
            .set_default("max_workers", num_cpus::get() as i64)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::new(SETTINGS_FILE, FileFormat::Toml).required(false)),
        };

        let settings: PipelineSettings = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Apply command line values on top of the loaded settings
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(path) = overrides.reference_file {
            self.reference_file = path;
        }
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(pattern) = overrides.raw_pattern {
            self.raw_pattern = pattern;
        }
        if let Some(path) = overrides.output_file {
            self.output_file = path;
        }
        if let Some(path) = overrides.plot_file {
            self.plot_file = path;
        }
        if overrides.no_plot {
            self.plot = false;
        }
        if let Some(date) = overrides.cutoff_date {
            self.cutoff_date = date;
        }
        if let Some(value) = overrides.fill_value {
            self.fill_value = value;
        }
        if let Some(hours) = overrides.window_hours {
            self.window_hours = hours;
        }
        if let Some(workers) = overrides.max_workers {
            self.max_workers = workers;
        }
        self
    }

    /// Field-level validation plus the path checks `validator` cannot express
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        for (name, path) in [
            ("reference_file", &self.reference_file),
            ("output_file", &self.output_file),
            ("plot_file", &self.plot_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ProcessingError::Config(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            reference_file: PathBuf::from(REFERENCE_FILE),
            data_dir: PathBuf::from("."),
            raw_pattern: RAW_FILE_PATTERN.to_string(),
            output_file: PathBuf::from(OUTPUT_FILE),
            plot: true,
            plot_file: PathBuf::from(PLOT_FILE),
            cutoff_date: NaiveDate::from_ymd_opt(2017, 1, 2).unwrap_or(NaiveDate::MIN),
            fill_value: DEFAULT_FILL_RANGE,
            window_hours: RANGE_WINDOW_HOURS,
            unit_factor: M2FT,
            max_workers: num_cpus::get(),
        }
    }
}
