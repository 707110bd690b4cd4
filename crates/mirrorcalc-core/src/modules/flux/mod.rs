mod model;
mod parser;

pub use model::{
    FluxTable, PowerSummary, bandwidth_to_per_ev, integrate_summary, per_ev_to_bandwidth,
    power_density_w_per_ev, render_power_summary,
};

use super::StageExecutor;
use crate::common::config::AnalysisConfig;
use crate::domain::{AnalysisArtifact, ComputeResult, MirrorError};
use crate::modules::serialization::write_text_artifact;
use crate::numerics::QuadratureRule;
use crate::plot::render_flux_plot;

use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct FluxOutcome {
    pub table: FluxTable,
    pub summary: PowerSummary,
    pub artifacts: Vec<AnalysisArtifact>,
}

/// Flux stage: table ingestion, comparison plot, unit conversion and the
/// four definite integrals.
pub struct FluxStage<'a> {
    rule: &'a dyn QuadratureRule,
}

impl<'a> FluxStage<'a> {
    pub fn new(rule: &'a dyn QuadratureRule) -> Self {
        Self { rule }
    }

    /// Table ingestion and integration without artifact side effects.
    pub fn compute_summary(
        &self,
        config: &AnalysisConfig,
    ) -> ComputeResult<(FluxTable, PowerSummary)> {
        let table = parser::load_flux_table(&config.flux_table.path, &config.flux_table)?;
        let summary = integrate_summary(&table, self.rule)?;
        Ok((table, summary))
    }

    /// Full stage: ingest, plot, integrate, write the JSON summary.
    pub fn run(&self, config: &AnalysisConfig, output_dir: &Path) -> ComputeResult<FluxOutcome> {
        config.validate()?;
        let (table, summary) = self.compute_summary(config)?;

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

        let plot_artifact = AnalysisArtifact::new(config.flux_plot_name());
        render_flux_plot(
            &output_dir.join(&plot_artifact.relative_path),
            &table.energies_ev,
            &table.total_flux_bw,
            &table.filtered_flux_bw,
            (config.plot.width_px, config.plot.height_px),
        )?;

        let summary_artifact = AnalysisArtifact::new(config.power_summary_name());
        let summary_path = output_dir.join(&summary_artifact.relative_path);
        let rendered = serde_json::to_string_pretty(&summary).map_err(|source| {
            MirrorError::internal(
                "SYS.POWER_SUMMARY_ENCODE",
                format!("failed to encode power summary: {}", source),
            )
        })?;
        write_text_artifact(&summary_path, &rendered).map_err(|source| {
            MirrorError::io_system(
                "IO.POWER_SUMMARY_WRITE",
                format!(
                    "failed to write power summary '{}': {}",
                    summary_path.display(),
                    source
                ),
            )
        })?;

        Ok(FluxOutcome {
            table,
            summary,
            artifacts: vec![plot_artifact, summary_artifact],
        })
    }
}

impl StageExecutor for FluxStage<'_> {
    fn execute(
        &self,
        config: &AnalysisConfig,
        output_dir: &Path,
    ) -> ComputeResult<Vec<AnalysisArtifact>> {
        self.run(config, output_dir).map(|outcome| outcome.artifacts)
    }
}
