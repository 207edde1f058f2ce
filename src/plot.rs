//! Four-panel analysis chart for a fitted calibration.
//!
//! Renders scatter + fit line, residuals vs raw, the inverse mapping, and
//! percentage error vs reference into a single bitmap, one panel per
//! quadrant. Only compiled with the `plots` feature.

use std::path::Path;

use log::info;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::calibrator::{percent_errors, residuals, FitResult};
use crate::sample::SampleSet;

/// Drawing area for one quadrant of the analysis chart.
type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Render the four-panel analysis chart to `path` as a bitmap of the given
/// pixel dimensions.
///
/// Callers are expected to pass a well-posed fit produced from `samples`;
/// the chart is drawn from the same per-sample series the error statistics
/// are computed from.
pub fn render_analysis(
    samples: &SampleSet,
    fit: &FitResult,
    quantity: &str,
    path: &Path,
    (width, height): (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((2, 2));
    draw_fit_panel(&panels[0], samples, fit, quantity)?;
    draw_residual_panel(&panels[1], samples, fit, quantity)?;
    draw_inverse_panel(&panels[2], samples, fit, quantity)?;
    draw_error_panel(&panels[3], samples, fit, quantity)?;

    root.present()?;
    info!("Plot saved to {}", path.display());

    Ok(())
}

/// Measured data with the fitted line overlaid.
fn draw_fit_panel(
    area: &Panel<'_>,
    samples: &SampleSet,
    fit: &FitResult,
    quantity: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (raw_min, raw_max) = pad_range(samples.raw_range());
    let (ref_min, ref_max) = pad_range(samples.reference_range());

    let mut chart = ChartBuilder::on(area)
        .caption("ADC Linearization", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(raw_min..raw_max, ref_min..ref_max)?;

    chart
        .configure_mesh()
        .x_desc("ADC Value")
        .y_desc(format!("Reference ({quantity})"))
        .draw()?;

    chart
        .draw_series(PointSeries::of_element(
            samples.iter().map(|s| (s.raw, s.reference)),
            4,
            &BLUE,
            &|c, s, st| Circle::new(c, s, st.filled()),
        ))?
        .label("Measured")
        .legend(|(x, y)| Circle::new((x + 5, y), 3, BLUE.filled()));

    chart
        .draw_series(LineSeries::new(
            [raw_min, raw_max]
                .iter()
                .map(|&raw| (raw, fit.predict(raw))),
            &RED,
        ))?
        .label(format!(
            "Fit: y = {:.4}x + {:.4}",
            fit.slope, fit.intercept
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Fit residuals against the raw readings.
fn draw_residual_panel(
    area: &Panel<'_>,
    samples: &SampleSet,
    fit: &FitResult,
    quantity: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let residuals = residuals(samples, fit);
    let (raw_min, raw_max) = pad_range(samples.raw_range());
    let (res_min, res_max) = pad_symmetric_range(&residuals);

    let mut chart = ChartBuilder::on(area)
        .caption("Fit Residuals", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(raw_min..raw_max, res_min..res_max)?;

    chart
        .configure_mesh()
        .x_desc("ADC Value")
        .y_desc(format!("Residual ({quantity})"))
        .draw()?;

    chart.draw_series(PointSeries::of_element(
        samples.iter().map(|s| s.raw).zip(residuals.iter().copied()),
        4,
        &GREEN,
        &|c, s, st| Circle::new(c, s, st.filled()),
    ))?;

    draw_zero_line(&mut chart, raw_min, raw_max)?;

    Ok(())
}

/// The inverse mapping from reference values back to ADC readings.
fn draw_inverse_panel(
    area: &Panel<'_>,
    samples: &SampleSet,
    fit: &FitResult,
    quantity: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ref_min, ref_max) = pad_range(samples.reference_range());
    let (raw_min, raw_max) = pad_range(samples.raw_range());

    let mut chart = ChartBuilder::on(area)
        .caption("Inverse Conversion", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(ref_min..ref_max, raw_min..raw_max)?;

    chart
        .configure_mesh()
        .x_desc(format!("Reference ({quantity})"))
        .y_desc("ADC Value")
        .draw()?;

    chart
        .draw_series(PointSeries::of_element(
            samples.iter().map(|s| (s.reference, s.raw)),
            4,
            &MAGENTA,
            &|c, s, st| Circle::new(c, s, st.filled()),
        ))?
        .label("Measured")
        .legend(|(x, y)| Circle::new((x + 5, y), 3, MAGENTA.filled()));

    // Inverse of a well-posed fit is defined; fall back to skipping the
    // line rather than failing the whole chart on a zero slope.
    if fit.slope != 0.0 {
        chart
            .draw_series(LineSeries::new(
                [ref_min, ref_max]
                    .iter()
                    .map(|&r| (r, (r - fit.intercept) / fit.slope)),
                &RED,
            ))?
            .label(format!(
                "Inverse: ADC = (y - {:.4}) / {:.4}",
                fit.intercept, fit.slope
            ))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], RED));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Percentage error against the reference values (zero references excluded).
fn draw_error_panel(
    area: &Panel<'_>,
    samples: &SampleSet,
    fit: &FitResult,
    quantity: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let errors = percent_errors(samples, fit);
    let (ref_min, ref_max) = pad_range(samples.reference_range());
    let error_values: Vec<f64> = errors.iter().map(|&(_, e)| e).collect();
    let (err_min, err_max) = pad_symmetric_range(&error_values);

    let mut chart = ChartBuilder::on(area)
        .caption("Percentage Error", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(ref_min..ref_max, err_min..err_max)?;

    chart
        .configure_mesh()
        .x_desc(format!("Reference ({quantity})"))
        .y_desc("Error (%)")
        .draw()?;

    chart.draw_series(PointSeries::of_element(
        errors.iter().copied(),
        4,
        &RGBColor(255, 165, 0),
        &|c, s, st| Circle::new(c, s, st.filled()),
    ))?;

    draw_zero_line(&mut chart, ref_min, ref_max)?;

    Ok(())
}

fn draw_zero_line(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x_min: f64,
    x_max: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    chart.draw_series(DashedLineSeries::new(
        [(x_min, 0.0), (x_max, 0.0)],
        6,
        4,
        ShapeStyle::from(&RED),
    ))?;
    Ok(())
}

/// Expand a (min, max) range by 5% on each side so points do not sit on the
/// plot border. Degenerate ranges get a unit of padding.
fn pad_range((min, max): (f64, f64)) -> (f64, f64) {
    let span = max - min;
    if span <= 0.0 {
        return (min - 1.0, max + 1.0);
    }
    (min - 0.05 * span, max + 0.05 * span)
}

/// Symmetric range around zero covering all values, for residual-style
/// panels where the zero line is the anchor.
fn pad_symmetric_range(values: &[f64]) -> (f64, f64) {
    let magnitude = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if magnitude <= 0.0 {
        return (-1.0, 1.0);
    }
    (-1.1 * magnitude, 1.1 * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_range() {
        let (min, max) = pad_range((0.0, 100.0));
        assert_eq!((min, max), (-5.0, 105.0));
    }

    #[test]
    fn test_pad_range_degenerate() {
        let (min, max) = pad_range((5.0, 5.0));
        assert_eq!((min, max), (4.0, 6.0));
    }

    #[test]
    fn test_pad_symmetric_range() {
        let (min, max) = pad_symmetric_range(&[-0.2, 0.5, 0.1]);
        assert!((min - (-0.55)).abs() < 1e-12);
        assert!((max - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_pad_symmetric_range_all_zero() {
        assert_eq!(pad_symmetric_range(&[0.0, 0.0]), (-1.0, 1.0));
        assert_eq!(pad_symmetric_range(&[]), (-1.0, 1.0));
    }
}
