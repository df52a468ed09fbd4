//! Two panel comparison chart
//!
//! Left: AES encryption time per key size. Right: RSA key generation time per
//! key size. Each panel gets its own axes.
//!
//! Failed samples stay on the line at the time recorded until the failure and
//! are marked with a black cross instead of the series marker.

use super::runner::{BenchmarkReport, KeySizeSample};
use crate::error::{LabError, Result};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 500;

pub const X_DESC: &str = "Key Size (bits)";
pub const Y_DESC: &str = "Time (seconds)";
pub const AES_TITLE: &str = "AES Encryption Performance";
pub const RSA_TITLE: &str = "RSA Key Generation Performance";

#[derive(Clone, Copy)]
enum Marker {
    Circle,
    Triangle,
}

struct Panel<'a> {
    title: &'a str,
    samples: &'a [KeySizeSample],
    color: RGBColor,
    marker: Marker,
}

/// Renders `report` to `path`, replacing any previous chart
pub fn render(report: &BenchmarkReport, path: &Path) -> Result<PathBuf> {
    draw(report, path).map_err(|err| LabError::Render(err.to_string()))?;

    info!("Graph saved: {}", path.display());
    Ok(path.to_path_buf())
}

fn draw(report: &BenchmarkReport, path: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (left, right) = root.split_horizontally(WIDTH / 2);

    draw_panel(
        &left,
        &Panel {
            title: AES_TITLE,
            samples: report.aes(),
            color: BLUE,
            marker: Marker::Circle,
        },
    )?;
    draw_panel(
        &right,
        &Panel {
            title: RSA_TITLE,
            samples: report.rsa(),
            color: RED,
            marker: Marker::Triangle,
        },
    )?;

    root.present()?;
    Ok(())
}

fn point(sample: &KeySizeSample) -> (i32, f64) {
    (sample.key_size_bits() as i32, sample.elapsed_seconds())
}

/// What gets drawn for one panel
#[derive(Debug, PartialEq)]
struct Series {
    /// every sample, in configured order
    line: Vec<(i32, f64)>,
    /// samples drawn with the panel's marker
    ok: Vec<(i32, f64)>,
    /// samples drawn with a cross
    failed: Vec<(i32, f64)>,
}

fn series(samples: &[KeySizeSample]) -> Series {
    let (ok, failed): (Vec<_>, Vec<_>) = samples.iter().partition(|s| s.is_ok());

    Series {
        line: samples.iter().map(point).collect(),
        ok: ok.into_iter().map(point).collect(),
        failed: failed.into_iter().map(point).collect(),
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let series = series(panel.samples);
    let points = &series.line;

    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(1);
    let x_pad = ((x_max - x_min) / 10).max(16);

    // keep a non-empty y range even when every sample took ~0s
    let y_max = points.iter().map(|p| p.1).fold(0.0, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.15 } else { 1e-6 };

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(90)
        .build_cartesian_2d((x_min - x_pad)..(x_max + x_pad), 0f64..y_top)?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .y_label_formatter(&|y| format!("{:.6}", y))
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        panel.color.stroke_width(2),
    ))?;

    let ok = series.ok.iter().copied();
    match panel.marker {
        Marker::Circle => {
            chart.draw_series(ok.map(|p| Circle::new(p, 5, panel.color.filled())))?;
        }
        Marker::Triangle => {
            chart.draw_series(ok.map(|p| TriangleMarker::new(p, 6, panel.color.filled())))?;
        }
    }

    let failed = series.failed.iter().copied();
    chart.draw_series(failed.map(|p| Cross::new(p, 7, BLACK.stroke_width(2))))?;

    Ok(())
}
