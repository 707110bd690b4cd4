//! Raster plot rendering over `plotters`. Purely a rendering side effect:
//! deterministic for identical input data, no numeric computation of its own.

use crate::domain::{ComputeResult, MirrorError};

use plotters::prelude::*;
use std::path::Path;

const SERIES_BLUE: RGBColor = RGBColor(31, 92, 170);
const SERIES_ORANGE: RGBColor = RGBColor(214, 110, 28);

/// Reflectivity-vs-energy plot on fixed linear axes: x in [0, max_energy_ev
/// converted to keV], y in [0, 1], comparable across runs.
pub fn render_reflectivity_plot(
    output_path: &Path,
    material: &str,
    energies_ev: &[f64],
    reflectivity: &[f64],
    max_energy_ev: f64,
    dimensions: (u32, u32),
) -> ComputeResult<()> {
    let root = BitMapBackend::new(output_path, dimensions).into_drawing_area();
    root.fill(&WHITE).map_err(|error| render_error(&error))?;

    let title = format!("{} Reflectivity", material);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 44))
        .margin(40)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..max_energy_ev / 1000.0, 0.0..1.0)
        .map_err(|error| render_error(&error))?;

    chart
        .configure_mesh()
        .x_desc("Energy [keV]")
        .y_desc("Reflectivity")
        .x_label_style(("sans-serif", 26))
        .y_label_style(("sans-serif", 26))
        .axis_desc_style(("sans-serif", 30))
        .draw()
        .map_err(|error| render_error(&error))?;

    chart
        .draw_series(LineSeries::new(
            energies_ev
                .iter()
                .zip(reflectivity.iter())
                .map(|(energy, value)| (energy / 1000.0, *value)),
            SERIES_BLUE.stroke_width(3),
        ))
        .map_err(|error| render_error(&error))?;

    root.present().map_err(|error| present_error(output_path, &error))?;
    Ok(())
}

/// Total/filtered flux comparison on auto-ranged log-log axes.
pub fn render_flux_plot(
    output_path: &Path,
    energies_ev: &[f64],
    total_flux: &[f64],
    filtered_flux: &[f64],
    dimensions: (u32, u32),
) -> ComputeResult<()> {
    let (x_range, y_range) = log_log_ranges(energies_ev, total_flux, filtered_flux)?;

    let root = BitMapBackend::new(output_path, dimensions).into_drawing_area();
    root.fill(&WHITE).map_err(|error| render_error(&error))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Flux M1 - QUATI", ("sans-serif", 44))
        .margin(40)
        .x_label_area_size(70)
        .y_label_area_size(110)
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())
        .map_err(|error| render_error(&error))?;

    chart
        .configure_mesh()
        .x_desc("Energy [keV]")
        .y_desc("Flux [ph/sec/0.1%BW/100mA]")
        .x_label_style(("sans-serif", 26))
        .y_label_style(("sans-serif", 26))
        .axis_desc_style(("sans-serif", 30))
        .draw()
        .map_err(|error| render_error(&error))?;

    chart
        .draw_series(LineSeries::new(
            energies_ev
                .iter()
                .zip(total_flux.iter())
                .map(|(energy, value)| (energy / 1000.0, *value)),
            SERIES_BLUE.stroke_width(3),
        ))
        .map_err(|error| render_error(&error))?
        .label("Total Flux")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], SERIES_BLUE.stroke_width(3)));

    chart
        .draw_series(LineSeries::new(
            energies_ev
                .iter()
                .zip(filtered_flux.iter())
                .map(|(energy, value)| (energy / 1000.0, *value)),
            SERIES_ORANGE.stroke_width(3),
        ))
        .map_err(|error| render_error(&error))?
        .label("Filtered by M1")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 24, y)], SERIES_ORANGE.stroke_width(3))
        });

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.85))
        .label_font(("sans-serif", 26))
        .draw()
        .map_err(|error| render_error(&error))?;

    root.present().map_err(|error| present_error(output_path, &error))?;
    Ok(())
}

/// Padded positive ranges for the log-log axes. Log axes cannot hold zeros or
/// negatives, so those samples disqualify the plot rather than being dropped.
fn log_log_ranges(
    energies_ev: &[f64],
    total_flux: &[f64],
    filtered_flux: &[f64],
) -> ComputeResult<(std::ops::Range<f64>, std::ops::Range<f64>)> {
    if energies_ev.is_empty() {
        return Err(MirrorError::computation(
            "RUN.PLOT_RANGE",
            "flux plot requires at least one sample",
        ));
    }

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for value in total_flux.iter().chain(filtered_flux.iter()) {
        y_min = y_min.min(*value);
        y_max = y_max.max(*value);
    }
    let x_min = energies_ev[0] / 1000.0;
    let x_max = energies_ev[energies_ev.len() - 1] / 1000.0;

    if x_min <= 0.0 || y_min <= 0.0 {
        return Err(MirrorError::computation(
            "RUN.PLOT_RANGE",
            format!(
                "log-log flux plot requires positive data, got energy min {} keV and flux min {}",
                x_min, y_min
            ),
        ));
    }

    Ok((x_min..x_max, y_min * 0.5..y_max * 2.0))
}

fn render_error<E: std::fmt::Debug>(error: &E) -> MirrorError {
    MirrorError::computation("RUN.PLOT_RENDER", format!("{:?}", error))
}

fn present_error<E: std::fmt::Debug>(output_path: &Path, error: &E) -> MirrorError {
    MirrorError::io_system(
        "IO.PLOT_WRITE",
        format!(
            "failed to write plot '{}': {:?}",
            output_path.display(),
            error
        ),
    )
}
