/// File names
pub const REFERENCE_FILE: &str = "sf_stage_noaa_screened.csv";
pub const RAW_FILE_PATTERN: &str = "noaa_sffpx_*elev*.csv";
pub const OUTPUT_FILE: &str = "sftide.csv";
pub const PLOT_FILE: &str = "sftide_compare.svg";
pub const SETTINGS_FILE: &str = "sftide.toml";

/// Environment variable prefix for settings overrides (SFTIDE_FILL_VALUE, ...)
pub const ENV_PREFIX: &str = "SFTIDE";

/// Meters to feet
pub const M2FT: f64 = 3.28084;

/// Rolling range window in hours (centered)
pub const RANGE_WINDOW_HOURS: f64 = 25.0;

/// Fallback daily tidal range in feet
pub const DEFAULT_FILL_RANGE: f64 = 6.0;

/// First day of the raw series kept for the merge
pub const RAW_CUTOFF_DATE: &str = "2017-01-02";

/// Output formats
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const OUTPUT_DATE_HEADER: &str = "date";
pub const OUTPUT_VALUE_HEADER: &str = "range";
pub const OUTPUT_VALUE_PRECISION: usize = 2;

/// Repository CSV columns
pub const DATETIME_COLUMN: &str = "datetime";
pub const VALUE_COLUMN: &str = "value";
pub const FLAG_COLUMN: &str = "user_flag";

/// Timestamp layouts accepted by the readers, tried in order
pub const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Tokens read as missing values
pub const MISSING_TOKENS: [&str; 4] = ["", "nan", "NA", "N/A"];

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Chart size in pixels
pub const PLOT_WIDTH: u32 = 1280;
pub const PLOT_HEIGHT: u32 = 720;
