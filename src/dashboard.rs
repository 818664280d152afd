use std::path::Path;
use chrono::{DateTime, TimeDelta, Utc};
use log::info;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use thiserror::Error;
use crate::conditions::{DEFAULT_TOP_N, top_conditions};
use crate::forecast::ForecastPoint;

// 14x8 inch figure at 200 dpi
const DASHBOARD_SIZE: (u32, u32) = (2800, 1600);

const GRID_OPACITY: f64 = 0.15;

#[derive(Error, Debug)]
#[error("error rendering dashboard: {0}")]
pub struct RenderError(pub String);

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> RenderError {
        RenderError(e.to_string())
    }
}

/// Renders the four dashboard panels into a single PNG at 'out_path',
/// overwriting any existing file.
///
/// Panel layout is a fixed 2x2 grid: temperature lines, humidity and wind
/// lines, rain bars per 3h bucket, and the most frequent condition texts.
///
/// # Arguments
///
/// * 'points' - the forecast points to chart, ordered by time
/// * 'title' - figure title annotating city and horizon
/// * 'out_path' - where to write the image
pub fn render(points: &[ForecastPoint], title: &str, out_path: &Path) -> Result<(), RenderError> {
    if points.is_empty() {
        return Err(RenderError("no forecast points to render".to_string()));
    }

    let root = BitMapBackend::new(out_path, DASHBOARD_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let figure = root.titled(title, ("sans-serif", 44))?;
    let panels = figure.split_evenly((2, 2));

    temperature_panel(&panels[0], points)?;
    humidity_wind_panel(&panels[1], points)?;
    rain_panel(&panels[2], points)?;
    conditions_panel(&panels[3], points)?;

    root.present()?;
    info!("dashboard written to {}", out_path.display());

    Ok(())
}

/// The time range covered by the forecast, padded with one 3h bucket so
/// the last rain bar fits inside the axis
fn time_range(points: &[ForecastPoint]) -> std::ops::Range<DateTime<Utc>> {
    let first = points[0].timestamp;
    let last = points[points.len() - 1].timestamp;
    first..last + TimeDelta::hours(3)
}

/// Line chart of temperature and feels-like temperature over time
fn temperature_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    points: &[ForecastPoint],
) -> Result<(), RenderError> {
    let (mut y_min, mut y_max) = (f64::MAX, f64::MIN);
    for p in points {
        y_min = y_min.min(p.temperature_c).min(p.feels_like_c);
        y_max = y_max.max(p.temperature_c).max(p.feels_like_c);
    }

    let mut chart = ChartBuilder::on(area)
        .caption("Temperature Forecast", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(time_range(points), y_min - 1.0..y_max + 1.0)?;

    chart.configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%d %b %H:%M").to_string())
        .label_style(("sans-serif", 18))
        .bold_line_style(BLACK.mix(GRID_OPACITY))
        .light_line_style(TRANSPARENT)
        .y_desc("°C")
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|p| (p.timestamp, p.temperature_c)),
        &RED,
    ))?
        .label("Temp (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart.draw_series(LineSeries::new(
        points.iter().map(|p| (p.timestamp, p.feels_like_c)),
        &BLUE,
    ))?
        .label("Feels like (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;

    Ok(())
}

/// Line chart of humidity and wind speed over time, sharing one value axis
fn humidity_wind_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    points: &[ForecastPoint],
) -> Result<(), RenderError> {
    let y_max = points
        .iter()
        .map(|p| (p.humidity_pct as f64).max(p.wind_speed_ms))
        .fold(f64::MIN, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption("Humidity & Wind", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(time_range(points), 0.0..y_max + 5.0)?;

    chart.configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%d %b %H:%M").to_string())
        .label_style(("sans-serif", 18))
        .bold_line_style(BLACK.mix(GRID_OPACITY))
        .light_line_style(TRANSPARENT)
        .y_desc("Value")
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|p| (p.timestamp, p.humidity_pct as f64)),
        &GREEN,
    ))?
        .label("Humidity (%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart.draw_series(LineSeries::new(
        points.iter().map(|p| (p.timestamp, p.wind_speed_ms)),
        &MAGENTA,
    ))?
        .label("Wind (m/s)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MAGENTA));

    chart.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;

    Ok(())
}

/// Bar chart of rain volume per 3h bucket
fn rain_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    points: &[ForecastPoint],
) -> Result<(), RenderError> {
    let y_max = points
        .iter()
        .map(|p| p.rain_mm_3h)
        .fold(1.0_f64, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption("Rain (mm per 3h)", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(time_range(points), 0.0..y_max * 1.1)?;

    chart.configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%d %b %H:%M").to_string())
        .label_style(("sans-serif", 18))
        .bold_line_style(BLACK.mix(GRID_OPACITY))
        .light_line_style(TRANSPARENT)
        .y_desc("mm")
        .draw()?;

    chart.draw_series(points.iter().map(|p| {
        Rectangle::new(
            [(p.timestamp, 0.0), (p.timestamp + TimeDelta::hours(3), p.rain_mm_3h)],
            BLUE.mix(0.5).filled(),
        )
    }))?;

    Ok(())
}

/// Bar chart of the most frequent condition texts
fn conditions_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    points: &[ForecastPoint],
) -> Result<(), RenderError> {
    let top = top_conditions(points, DEFAULT_TOP_N);
    let labels: Vec<String> = top.iter().map(|(label, _)| label.clone()).collect();
    let y_max = top.iter().map(|(_, count)| *count).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(area)
        .caption("Most Frequent Conditions", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..y_max + 1)?;

    chart.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .label_style(("sans-serif", 18))
        .bold_line_style(BLACK.mix(GRID_OPACITY))
        .light_line_style(TRANSPARENT)
        .y_desc("Count")
        .draw()?;

    chart.draw_series(top.iter().enumerate().map(|(i, (_, count))| {
        Rectangle::new(
            [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), *count)],
            GREEN.mix(0.6).filled(),
        )
    }))?;

    Ok(())
}
