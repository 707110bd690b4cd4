use crate::domain::{ComputeResult, MirrorError};
use crate::modules::serialization::{format_fixed_f64, write_text_artifact};

use std::path::Path;

pub(super) const TABLE_HEADER: &str = "Energy (eV)\tReflectivity";
const TABLE_PRECISION: usize = 6;

/// Tab-delimited two-column table: header line, one row per grid point,
/// values at fixed 6-decimal precision.
pub(super) fn render_reflectivity_table(energies_ev: &[f64], reflectivity: &[f64]) -> String {
    let mut table = String::with_capacity((energies_ev.len() + 1) * 24);
    table.push_str(TABLE_HEADER);
    table.push('\n');
    for (energy, value) in energies_ev.iter().zip(reflectivity.iter()) {
        table.push_str(&format_fixed_f64(*energy, TABLE_PRECISION));
        table.push('\t');
        table.push_str(&format_fixed_f64(*value, TABLE_PRECISION));
        table.push('\n');
    }
    table
}

pub(super) fn write_reflectivity_table(
    output_path: &Path,
    energies_ev: &[f64],
    reflectivity: &[f64],
) -> ComputeResult<()> {
    let table = render_reflectivity_table(energies_ev, reflectivity);
    write_text_artifact(output_path, &table).map_err(|source| {
        MirrorError::io_system(
            "IO.REFLECTIVITY_TABLE_WRITE",
            format!(
                "failed to write reflectivity table '{}': {}",
                output_path.display(),
                source
            ),
        )
    })
}
