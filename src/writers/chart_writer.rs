use crate::error::{ProcessingError, Result};
use crate::models::DailySeries;
use crate::utils::constants::{PLOT_HEIGHT, PLOT_WIDTH};
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::Path;
use tracing::info;

type PlotResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const REFERENCE_COLOR: RGBColor = RGBColor(30, 144, 255);
const RAW_COLOR: RGBColor = RGBColor(200, 0, 100);

/// Renders the reference and raw daily ranges on one chart for inspection
pub struct ChartWriter {
    width: u32,
    height: u32,
    title: String,
}

impl ChartWriter {
    pub fn new() -> Self {
        Self {
            width: PLOT_WIDTH,
            height: PLOT_HEIGHT,
            title: "San Francisco daily tidal range".to_string(),
        }
    }

    /// Write an SVG comparing both series
    pub fn write_comparison(
        &self,
        reference: &DailySeries,
        raw: &DailySeries,
        path: &Path,
    ) -> Result<()> {
        let origin = match (reference.first_date(), raw.first_date()) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => {
                return Err(ProcessingError::MissingData(
                    "nothing to plot: both series are empty".to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        self.draw(root, origin, reference, raw)
            .map_err(|e| ProcessingError::Plot(e.to_string()))?;

        info!(path = %path.display(), "wrote comparison chart");
        Ok(())
    }

    fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        origin: NaiveDate,
        reference: &DailySeries,
        raw: &DailySeries,
    ) -> PlotResult<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let to_points = |series: &DailySeries| -> Vec<(f64, f64)> {
            series
                .present()
                .map(|(date, value)| ((date - origin).num_days() as f64, value))
                .collect()
        };
        let reference_points = to_points(reference);
        let raw_points = to_points(raw);

        let all = reference_points.iter().chain(raw_points.iter());
        let x_max = all.clone().map(|p| p.0).fold(1.0, f64::max);
        let mut y_max = all.map(|p| p.1).fold(1.0, f64::max);
        if !y_max.is_finite() {
            y_max = 1.0;
        }

        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(25)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.1))?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Tidal range (ft)")
            .x_label_formatter(&|v| (origin + Duration::days(*v as i64)).to_string())
            .y_label_formatter(&|v| format!("{:.1}", v))
            .draw()?;

        chart
            .draw_series(LineSeries::new(reference_points, &REFERENCE_COLOR))?
            .label("Reference")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &REFERENCE_COLOR));

        chart
            .draw_series(LineSeries::new(raw_points, &RAW_COLOR))?
            .label("Raw")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &RAW_COLOR));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartWriter {
    fn default() -> Self {
        Self::new()
    }
}
