use chrono::{Duration, NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use sftide::processors::TidePipeline;
use sftide::readers::RangeTableReader;
use sftide::settings::{PipelineSettings, SettingsOverrides};
use sftide::utils::constants::M2FT;
use sftide::ProcessingError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Repository-style raw file with hourly samples in meters
fn write_raw_file(path: &Path, samples: &[(NaiveDateTime, Option<f64>)]) {
    let mut contents = String::from("# station_id: 9414290\n# unit: meters\ndatetime,value\n");
    for (time, value) in samples {
        let value = value.map_or_else(String::new, |v| format!("{:.10}", v));
        writeln!(contents, "{},{}", time.format("%Y-%m-%d %H:%M:%S"), value).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn settings_for(dir: &Path, plot: bool) -> PipelineSettings {
    PipelineSettings::default().with_overrides(SettingsOverrides {
        reference_file: Some(dir.join("sf_stage_noaa_screened.csv")),
        data_dir: Some(dir.to_path_buf()),
        output_file: Some(dir.join("out").join("sftide.csv")),
        plot_file: Some(dir.join("out").join("sftide_compare.svg")),
        no_plot: !plot,
        max_workers: Some(2),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_reference_and_raw_merge_end_to_end() {
    let dir = TempDir::new().expect("Failed to create temp directory");

    fs::write(
        dir.path().join("sf_stage_noaa_screened.csv"),
        "2016-12-31 00:00:00 5.8\n",
    )
    .unwrap();

    // Flat water with a single spike giving a 7.2 ft range on 2017-01-02
    let spike = midnight(2017, 1, 2);
    let samples: Vec<_> = (0..=72)
        .map(|h| {
            let time = midnight(2016, 12, 31) + Duration::hours(h);
            let value = if time == spike { 7.2 / M2FT } else { 0.0 };
            (time, Some(value))
        })
        .collect();
    write_raw_file(
        &dir.path().join("noaa_sffpx_9414290_elev_2017.csv"),
        &samples,
    );

    let settings = settings_for(dir.path(), true);
    let output_path = settings.output_file.clone();
    let plot_path = settings.plot_file.clone();

    let output = TidePipeline::new(settings).run(None).await.unwrap();

    let written = fs::read_to_string(&output_path).unwrap();
    assert_eq!(
        written,
        "date,range\n2016-12-31,0.00\n2017-01-02,7.20\n2017-01-03,0.00\n"
    );
    assert!(plot_path.exists());

    let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    assert!(!output.raw.contains(day(2016, 12, 31)));
    assert_eq!(output.summary.raw_files, 1);
    assert_eq!(output.summary.days_from_raw, 2);
    assert_eq!(output.summary.days_from_reference, 1);
}

#[tokio::test]
async fn test_missing_midnight_is_filled_and_files_are_combined() {
    let dir = TempDir::new().expect("Failed to create temp directory");

    let reference: String = (0..48)
        .map(|h| {
            let time = midnight(2017, 1, 1) + Duration::hours(h);
            format!("{} {:.2}\n", time.format("%Y-%m-%d %H:%M:%S"), (h % 12) as f64 * 0.5)
        })
        .collect();
    fs::write(dir.path().join("sf_stage_noaa_screened.csv"), reference).unwrap();

    // Split across two files, no sample at 2017-01-03 00:00
    let hourly = |from: i64, to: i64| -> Vec<(NaiveDateTime, Option<f64>)> {
        (from..to)
            .map(|h| midnight(2017, 1, 2) + Duration::hours(h))
            .filter(|t| *t != midnight(2017, 1, 3))
            .map(|t| (t, Some(if t.time() == midnight(2017, 1, 2).time() { 1.0 } else { 0.5 })))
            .collect()
    };
    write_raw_file(
        &dir.path().join("noaa_sffpx_9414290_elev_a.csv"),
        &hourly(0, 30),
    );
    write_raw_file(
        &dir.path().join("noaa_sffpx_9414290_elev_b.csv"),
        &hourly(30, 60),
    );
    fs::write(dir.path().join("noaa_sffpx_9414290_temp.csv"), "not,relevant\n").unwrap();

    let settings = settings_for(dir.path(), false);
    let output_path = settings.output_file.clone();
    let plot_path = settings.plot_file.clone();

    let output = TidePipeline::new(settings).run(None).await.unwrap();

    assert_eq!(output.summary.raw_files, 2);
    assert!(!plot_path.exists());

    let table = RangeTableReader::new().read_table(&output_path).unwrap();
    let day = |d| NaiveDate::from_ymd_opt(2017, 1, d).unwrap();
    assert_eq!(table.start_date(), day(1));
    assert_eq!(table.len(), 4);

    // 2017-01-01 reference: saw-tooth 0.0..5.5 within the window
    assert_eq!(table.get(day(1)), Some(5.5));
    // 2017-01-02 raw: 1.0 m against 0.5 m
    let expected = (0.5 * M2FT * 100.0).round() / 100.0;
    assert_eq!(table.get(day(2)), Some(expected));
    // 2017-01-03 raw has no midnight sample: fallback range
    assert_eq!(table.get(day(3)), Some(6.0));
    // 2017-01-04 raw: midnight window holds 1.0 m at 2017-01-04 00:00
    assert_eq!(table.get(day(4)), Some(expected));
}

#[tokio::test]
async fn test_no_matching_raw_files_aborts() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(
        dir.path().join("sf_stage_noaa_screened.csv"),
        "2016-12-31 00:00:00 5.8\n",
    )
    .unwrap();

    let settings = settings_for(dir.path(), false);
    let output_path = settings.output_file.clone();

    let result = TidePipeline::new(settings).run(None).await;

    assert!(matches!(
        result,
        Err(ProcessingError::NoMatchingFiles { .. })
    ));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_malformed_reference_aborts() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(
        dir.path().join("sf_stage_noaa_screened.csv"),
        "2016-12-31 00:00:00 5.8\n2016-12-31 01:00:00\n",
    )
    .unwrap();
    write_raw_file(
        &dir.path().join("noaa_sffpx_9414290_elev.csv"),
        &[(midnight(2017, 1, 2), Some(1.0))],
    );

    let result = TidePipeline::new(settings_for(dir.path(), false))
        .run(None)
        .await;

    assert!(matches!(
        result,
        Err(ProcessingError::InvalidRecord { line: 2, .. })
    ));
}

#[tokio::test]
async fn test_nothing_to_plot_still_writes_csv() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(dir.path().join("sf_stage_noaa_screened.csv"), "").unwrap();
    // Only data before the cutoff: both plotted series end up empty
    write_raw_file(
        &dir.path().join("noaa_sffpx_9414290_elev_2016.csv"),
        &[(midnight(2016, 1, 1), Some(1.0))],
    );

    let settings = settings_for(dir.path(), true);
    let output_path = settings.output_file.clone();
    let plot_path = settings.plot_file.clone();

    let output = TidePipeline::new(settings).run(None).await.unwrap();

    assert!(output.merged.is_empty());
    assert_eq!(fs::read_to_string(&output_path).unwrap(), "date,range\n");
    assert!(!plot_path.exists());
}
