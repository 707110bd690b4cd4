pub mod flux;
pub mod reflectivity;
pub mod serialization;

pub use flux::{FluxOutcome, FluxStage};
pub use reflectivity::{ReflectivityCurve, ReflectivityOutcome, ReflectivityStage};

use crate::common::config::AnalysisConfig;
use crate::domain::{AnalysisArtifact, ComputeResult};
use crate::numerics::CompositeSimpson;
use crate::optics::FresnelModel;

use std::path::Path;

/// Uniform seam over the pipeline stages: run against a config, emit
/// artifacts into the output directory.
pub trait StageExecutor {
    fn execute(
        &self,
        config: &AnalysisConfig,
        output_dir: &Path,
    ) -> ComputeResult<Vec<AnalysisArtifact>>;
}

/// Everything one full run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub reflectivity: ReflectivityOutcome,
    pub flux: FluxOutcome,
}

impl AnalysisReport {
    pub fn artifacts(&self) -> Vec<AnalysisArtifact> {
        self.reflectivity
            .artifacts
            .iter()
            .chain(self.flux.artifacts.iter())
            .cloned()
            .collect()
    }
}

/// The full four-stage pipeline with the shipped model and quadrature rule:
/// reflectivity -> report/plot -> flux ingest -> integration. Data flows
/// strictly forward; the first failing stage aborts the run.
pub fn run_analysis(config: &AnalysisConfig, output_dir: &Path) -> ComputeResult<AnalysisReport> {
    config.validate()?;
    let model = FresnelModel;
    let rule = CompositeSimpson;

    let reflectivity = ReflectivityStage::new(&model).run(config, output_dir)?;
    let flux = FluxStage::new(&rule).run(config, output_dir)?;

    Ok(AnalysisReport { reflectivity, flux })
}
