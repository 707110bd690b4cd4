use super::model::FluxTable;
use crate::common::config::FluxTableSpec;
use crate::domain::{ComputeResult, MirrorError};

use std::fs;
use std::path::Path;

/// Reads the measured flux table: skips the declared header lines, then
/// extracts the configured columns from each whitespace-delimited row.
///
/// The downstream integrator needs an ascending energy axis, so ordering is
/// enforced here instead of being left as an undocumented caller obligation.
pub(super) fn load_flux_table(path: &Path, spec: &FluxTableSpec) -> ComputeResult<FluxTable> {
    let content = fs::read_to_string(path).map_err(|source| {
        MirrorError::io_system(
            "IO.FLUX_TABLE_READ",
            format!("failed to read flux table '{}': {}", path.display(), source),
        )
    })?;

    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < spec.header_lines {
        return Err(MirrorError::computation(
            "RUN.FLUX_TABLE_PARSE",
            format!(
                "flux table '{}' declares {} header lines but contains only {} lines",
                path.display(),
                spec.header_lines,
                lines.len()
            ),
        ));
    }

    let required_columns = spec
        .energy_column
        .max(spec.total_column)
        .max(spec.filtered_column)
        + 1;

    let mut energies_ev = Vec::new();
    let mut total_flux_bw = Vec::new();
    let mut filtered_flux_bw = Vec::new();

    for (offset, line) in lines[spec.header_lines..].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = spec.header_lines + offset + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < required_columns {
            return Err(MirrorError::computation(
                "RUN.FLUX_TABLE_PARSE",
                format!(
                    "flux table '{}' line {} has {} columns, expected at least {}",
                    path.display(),
                    line_number,
                    fields.len(),
                    required_columns
                ),
            ));
        }

        energies_ev.push(parse_field(path, line_number, fields[spec.energy_column])?);
        total_flux_bw.push(parse_field(path, line_number, fields[spec.total_column])?);
        filtered_flux_bw.push(parse_field(path, line_number, fields[spec.filtered_column])?);
    }

    if energies_ev.is_empty() {
        return Err(MirrorError::computation(
            "RUN.FLUX_TABLE_PARSE",
            format!("flux table '{}' contains no data rows", path.display()),
        ));
    }

    for index in 1..energies_ev.len() {
        if energies_ev[index] <= energies_ev[index - 1] {
            return Err(MirrorError::computation(
                "RUN.FLUX_TABLE_ORDER",
                format!(
                    "flux table '{}' energy axis is not strictly ascending: row {} has {} eV after {} eV",
                    path.display(),
                    index + 1,
                    energies_ev[index],
                    energies_ev[index - 1]
                ),
            ));
        }
    }

    Ok(FluxTable {
        energies_ev,
        total_flux_bw,
        filtered_flux_bw,
    })
}

fn parse_field(path: &Path, line_number: usize, field: &str) -> ComputeResult<f64> {
    field.parse::<f64>().map_err(|_| {
        MirrorError::computation(
            "RUN.FLUX_TABLE_PARSE",
            format!(
                "flux table '{}' line {} has a non-numeric field '{}'",
                path.display(),
                line_number,
                field
            ),
        )
    })
}
