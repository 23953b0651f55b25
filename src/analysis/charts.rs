//! Bar chart of per-entity averages using plotters.

use super::report::Report;
use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use plotters::style::register_font;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::Path;

const CHART_WIDTH: u32 = 900;
const HEADER_HEIGHT: u32 = 110;
const ROW_HEIGHT: u32 = 40;

const BAR_COLOR: RGBColor = RGBColor(243, 156, 18); // #F39C12
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

/// Fonts tried in order for chart text.
const FONT_CANDIDATES: [&str; 6] = [
    r"C:\Windows\Fonts\arial.ttf",
    r"C:\Windows\Fonts\segoeui.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Registers the first readable candidate font as "sans-serif" (normal and bold).
fn register_chart_font() -> Result<()> {
    for candidate in FONT_CANDIDATES {
        let Ok(bytes) = fs::read(candidate) else {
            continue;
        };
        // plotters keeps a 'static reference to registered font data
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        let registered = register_font("sans-serif", FontStyle::Normal, bytes).is_ok()
            && register_font("sans-serif", FontStyle::Bold, bytes).is_ok();
        if registered {
            return Ok(());
        }
    }
    Err(anyhow!("No usable font found for chart labels"))
}

/// Image height for a chart with `rows` bars.
fn chart_height(rows: usize) -> u32 {
    HEADER_HEIGHT + ROW_HEIGHT * rows.max(1) as u32
}

/// Upper bound of the score axis: 15% headroom over the best average for labels.
fn axis_max(report: &Report) -> f64 {
    let best = report
        .entities
        .iter()
        .map(|row| row.average)
        .fold(0.0f64, f64::max);
    (best * 1.15).max(1.0)
}

/// Draws one horizontal bar per entity, best average at the top.
///
/// Each bar is labelled with the same text as the console report line.
pub fn generate_average_chart(report: &Report, output_path: &Path) -> Result<()> {
    let rows = report.entities.len();
    if rows == 0 {
        return Err(anyhow!("No entities to chart"));
    }
    register_chart_font()?;

    let root = BitMapBackend::new(output_path, (CHART_WIDTH, chart_height(rows)))
        .into_drawing_area();
    root.fill(&WHITE)
        .context("Failed to fill chart background")?;

    let x_max = axis_max(report);
    let title = format!("Average Score (n = {} photos)", report.total_images);
    let title_font = ("sans-serif", 28).into_font().style(FontStyle::Bold);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, title_font)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(10)
        .build_cartesian_2d(0.0f64..x_max, 0.0f64..rows as f64)
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .disable_y_axis()
        .x_desc("Average score")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .light_line_style(GRID_COLOR)
        .bold_line_style(GRID_COLOR.mix(0.8))
        .draw()
        .context("Failed to draw mesh")?;

    let label_style = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (i, row) in report.entities.iter().enumerate() {
        // First row is drawn at the top
        let y = (rows - 1 - i) as f64;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.0, y + 0.15), (row.average, y + 0.85)],
            BAR_COLOR.mix(0.8).filled(),
        )))?;

        chart.draw_series(std::iter::once(Text::new(
            row.to_string(),
            (x_max * 0.01, y + 0.5),
            label_style.clone(),
        )))?;
    }

    root.present().context("Failed to save chart")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::report::ReportRow;

    fn row(entity: &str, average: f64) -> ReportRow {
        ReportRow {
            entity: entity.to_string(),
            average,
            count: 1,
            total: average as u128,
            min: average as u64,
            max: average as u64,
        }
    }

    #[test]
    fn test_chart_height() {
        assert_eq!(chart_height(0), HEADER_HEIGHT + ROW_HEIGHT);
        assert_eq!(chart_height(3), HEADER_HEIGHT + 3 * ROW_HEIGHT);
    }

    #[test]
    fn test_axis_max() {
        let report = Report {
            total_images: 2,
            entities: vec![row("Gold Ship", 1000.0), row("Vodka", 400.0)],
        };
        assert!((axis_max(&report) - 1150.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_max_all_zero() {
        let report = Report {
            total_images: 1,
            entities: vec![row("Vodka", 0.0)],
        };
        assert_eq!(axis_max(&report), 1.0);
    }

    #[test]
    fn test_empty_report_not_charted() {
        let report = Report {
            total_images: 0,
            entities: vec![],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        assert!(generate_average_chart(&report, &path).is_err());
        assert!(!path.exists());
    }
}
