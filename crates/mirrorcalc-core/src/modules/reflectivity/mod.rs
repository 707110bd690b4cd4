mod report;

use super::StageExecutor;
use crate::common::config::AnalysisConfig;
use crate::domain::{AnalysisArtifact, ComputeResult, MirrorError};
use crate::numerics::linear_grid;
use crate::optics::{ReflectivityModel, ReflectivityRequest};
use crate::plot::render_reflectivity_plot;

use std::fs;
use std::path::Path;

/// Computed reflectivity over the configured energy grid, with the derived
/// transmitted (absorbed) complement. All three sequences share indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectivityCurve {
    pub energies_ev: Vec<f64>,
    pub reflectivity: Vec<f64>,
    pub transmitted: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectivityOutcome {
    pub curve: ReflectivityCurve,
    pub artifacts: Vec<AnalysisArtifact>,
}

/// Reflectivity stage: energy grid, model evaluation, contract check,
/// table and plot artifacts.
pub struct ReflectivityStage<'a> {
    model: &'a dyn ReflectivityModel,
}

impl<'a> ReflectivityStage<'a> {
    pub fn new(model: &'a dyn ReflectivityModel) -> Self {
        Self { model }
    }

    /// Grid construction and model evaluation without artifact side effects.
    pub fn compute_curve(&self, config: &AnalysisConfig) -> ComputeResult<ReflectivityCurve> {
        let energies_ev = linear_grid(config.grid.start_ev, config.grid.end_ev, config.grid.samples)
            .map_err(|source| {
                MirrorError::input_validation("INPUT.GRID", source.to_string())
            })?;

        let request = ReflectivityRequest {
            material: &config.mirror.material,
            density_g_cm3: config.mirror.density_g_cm3,
            atomic_mass: config.mirror.atomic_mass,
            energies_ev: &energies_ev,
            angle_from_normal_deg: config.mirror.angle_from_normal_deg(),
        };
        let reflectivity = self.model.reflectivity(&request)?;
        verify_model_contract(&energies_ev, &reflectivity)?;

        let transmitted = reflectivity.iter().map(|value| 1.0 - value).collect();
        Ok(ReflectivityCurve {
            energies_ev,
            reflectivity,
            transmitted,
        })
    }

    /// Full stage: compute the curve, write the table, render the plot.
    pub fn run(
        &self,
        config: &AnalysisConfig,
        output_dir: &Path,
    ) -> ComputeResult<ReflectivityOutcome> {
        config.validate()?;
        let curve = self.compute_curve(config)?;

        fs::create_dir_all(output_dir).map_err(|source| {
            MirrorError::io_system(
                "IO.OUTPUT_DIRECTORY",
                format!(
                    "failed to create output directory '{}': {}",
                    output_dir.display(),
                    source
                ),
            )
        })?;

        let table_artifact = AnalysisArtifact::new(config.reflectivity_table_name());
        report::write_reflectivity_table(
            &output_dir.join(&table_artifact.relative_path),
            &curve.energies_ev,
            &curve.reflectivity,
        )?;

        let plot_artifact = AnalysisArtifact::new(config.reflectivity_plot_name());
        render_reflectivity_plot(
            &output_dir.join(&plot_artifact.relative_path),
            &config.mirror.material,
            &curve.energies_ev,
            &curve.reflectivity,
            config.grid.end_ev,
            (config.plot.width_px, config.plot.height_px),
        )?;

        Ok(ReflectivityOutcome {
            curve,
            artifacts: vec![table_artifact, plot_artifact],
        })
    }
}

impl StageExecutor for ReflectivityStage<'_> {
    fn execute(
        &self,
        config: &AnalysisConfig,
        output_dir: &Path,
    ) -> ComputeResult<Vec<AnalysisArtifact>> {
        self.run(config, output_dir).map(|outcome| outcome.artifacts)
    }
}

/// The model owes one value per grid energy, each inside [0, 1]. A violation
/// is surfaced as an error, never clamped.
fn verify_model_contract(energies_ev: &[f64], reflectivity: &[f64]) -> ComputeResult<()> {
    if reflectivity.len() != energies_ev.len() {
        return Err(MirrorError::computation(
            "RUN.OPTICS_CONTRACT",
            format!(
                "reflectivity model returned {} values for {} grid energies",
                reflectivity.len(),
                energies_ev.len()
            ),
        ));
    }
    for (index, value) in reflectivity.iter().copied().enumerate() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(MirrorError::computation(
                "RUN.OPTICS_CONTRACT",
                format!(
                    "reflectivity model violated its output contract at index {}: {} is outside [0, 1]",
                    index, value
                ),
            ));
        }
    }
    Ok(())
}
