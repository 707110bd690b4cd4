//! Run configuration for the analysis pipeline.
//!
//! The compiled-in default reproduces the QUATI M1 platinum-mirror study;
//! a JSON file with the same shape can override any subset of it. The config
//! is constructed once at process start and read-only afterwards.

use crate::common::constants::RADDEG;
use crate::domain::{ComputeResult, MirrorError};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Mirror coating and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorParams {
    /// Element symbol of the coating, e.g. "Pt".
    pub material: String,
    /// Coating density [g/cm^3].
    pub density_g_cm3: f64,
    /// Atomic mass of the coating element [g/mol].
    pub atomic_mass: f64,
    /// Grazing angle between beam and mirror surface [rad].
    pub grazing_angle_rad: f64,
}

impl Default for MirrorParams {
    fn default() -> Self {
        Self {
            material: "Pt".to_string(),
            density_g_cm3: 21.45,
            atomic_mass: 195.08,
            grazing_angle_rad: 2.25e-3,
        }
    }
}

impl MirrorParams {
    /// Angle between beam and surface normal [deg], the convention the
    /// reflectivity model is addressed in.
    pub fn angle_from_normal_deg(&self) -> f64 {
        90.0 - self.grazing_angle_rad * RADDEG
    }
}

/// Energy sampling for the computed reflectivity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyGridSpec {
    pub start_ev: f64,
    pub end_ev: f64,
    pub samples: usize,
}

impl Default for EnergyGridSpec {
    fn default() -> Self {
        Self {
            start_ev: 100.0,
            end_ev: 80_000.0,
            samples: 10_000,
        }
    }
}

/// Location and column layout of the measured flux table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxTableSpec {
    pub path: PathBuf,
    pub header_lines: usize,
    pub energy_column: usize,
    pub total_column: usize,
    pub filtered_column: usize,
}

impl Default for FluxTableSpec {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Flux_QUATI_M1_E1.txt"),
            header_lines: 2,
            energy_column: 0,
            total_column: 1,
            filtered_column: 5,
        }
    }
}

/// Raster dimensions shared by both plots (the 600 dpi rendering of the
/// reference study).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for PlotSpec {
    fn default() -> Self {
        Self {
            width_px: 2400,
            height_px: 1800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub mirror: MirrorParams,
    #[serde(default)]
    pub grid: EnergyGridSpec,
    #[serde(default)]
    pub flux_table: FluxTableSpec,
    #[serde(default)]
    pub plot: PlotSpec,
}

impl AnalysisConfig {
    /// The QUATI M1 platinum-mirror study this tool was written for.
    pub fn quati_m1_platinum() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> ComputeResult<Self> {
        let config: Self = serde_json::from_str(content).map_err(|source| {
            MirrorError::input_validation(
                "INPUT.CONFIG_PARSE",
                format!("failed to parse analysis configuration: {}", source),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ComputeResult<()> {
        if !self.mirror.density_g_cm3.is_finite() || self.mirror.density_g_cm3 <= 0.0 {
            return Err(MirrorError::input_validation(
                "INPUT.MIRROR_DENSITY",
                format!(
                    "mirror density must be finite and > 0 g/cm^3, got {}",
                    self.mirror.density_g_cm3
                ),
            ));
        }
        if !self.mirror.atomic_mass.is_finite() || self.mirror.atomic_mass <= 0.0 {
            return Err(MirrorError::input_validation(
                "INPUT.MIRROR_MASS",
                format!(
                    "atomic mass must be finite and > 0 g/mol, got {}",
                    self.mirror.atomic_mass
                ),
            ));
        }
        let quarter_turn = std::f64::consts::FRAC_PI_2;
        if !self.mirror.grazing_angle_rad.is_finite()
            || self.mirror.grazing_angle_rad <= 0.0
            || self.mirror.grazing_angle_rad >= quarter_turn
        {
            return Err(MirrorError::input_validation(
                "INPUT.MIRROR_ANGLE",
                format!(
                    "grazing angle must lie in (0, pi/2) rad exclusive, got {}",
                    self.mirror.grazing_angle_rad
                ),
            ));
        }
        if !self.grid.start_ev.is_finite()
            || !self.grid.end_ev.is_finite()
            || self.grid.start_ev >= self.grid.end_ev
        {
            return Err(MirrorError::input_validation(
                "INPUT.GRID_BOUNDS",
                format!(
                    "energy grid requires start < end, got [{}, {}] eV",
                    self.grid.start_ev, self.grid.end_ev
                ),
            ));
        }
        if self.grid.samples < 2 {
            return Err(MirrorError::input_validation(
                "INPUT.GRID_SAMPLES",
                format!("energy grid requires >= 2 samples, got {}", self.grid.samples),
            ));
        }
        let columns = [
            self.flux_table.energy_column,
            self.flux_table.total_column,
            self.flux_table.filtered_column,
        ];
        if columns[0] == columns[1] || columns[0] == columns[2] || columns[1] == columns[2] {
            return Err(MirrorError::input_validation(
                "INPUT.FLUX_COLUMNS",
                format!(
                    "flux table columns must be distinct, got energy={} total={} filtered={}",
                    columns[0], columns[1], columns[2]
                ),
            ));
        }
        if self.plot.width_px == 0 || self.plot.height_px == 0 {
            return Err(MirrorError::input_validation(
                "INPUT.PLOT_DIMENSIONS",
                format!(
                    "plot dimensions must be non-zero, got {}x{}",
                    self.plot.width_px, self.plot.height_px
                ),
            ));
        }
        Ok(())
    }

    /// `Refl_<material>_E<start>_<end>.txt`
    pub fn reflectivity_table_name(&self) -> String {
        format!(
            "Refl_{}_E{:.0}_{:.0}.txt",
            self.mirror.material, self.grid.start_ev, self.grid.end_ev
        )
    }

    /// `<material>_Reflectivity.png`
    pub fn reflectivity_plot_name(&self) -> String {
        format!("{}_Reflectivity.png", self.mirror.material)
    }

    pub fn flux_plot_name(&self) -> String {
        "Flux.png".to_string()
    }

    pub fn power_summary_name(&self) -> String {
        "power_summary.json".to_string()
    }
}
