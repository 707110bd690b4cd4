use super::CliError;
use anyhow::Context;
use mirrorcalc_core::common::config::AnalysisConfig;
use mirrorcalc_core::domain::{AnalysisStage, MirrorError};
use mirrorcalc_core::modules::flux::render_power_summary;
use mirrorcalc_core::modules::{FluxStage, ReflectivityStage, run_analysis};
use mirrorcalc_core::numerics::CompositeSimpson;
use mirrorcalc_core::optics::FresnelModel;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(clap::Args)]
pub(super) struct AnalysisArgs {
    /// Analysis configuration JSON path (compiled-in QUATI M1 defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the generated artifacts
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

pub(super) fn run_full_analysis(args: AnalysisArgs) -> Result<i32, CliError> {
    let config = load_config(args.config.as_deref())?;
    ensure_output_dir(&args.output_dir)?;

    tracing::info!(
        material = %config.mirror.material,
        samples = config.grid.samples,
        "starting full analysis"
    );
    let report = run_analysis(&config, &args.output_dir).map_err(CliError::Compute)?;
    for artifact in report.artifacts() {
        tracing::info!(artifact = %artifact.relative_path.display(), "artifact written");
    }

    println!();
    println!("{}", render_power_summary(&report.flux.summary));
    Ok(0)
}

pub(super) fn run_reflectivity_stage(args: AnalysisArgs) -> Result<i32, CliError> {
    let config = load_config(args.config.as_deref())?;
    ensure_output_dir(&args.output_dir)?;

    tracing::info!(
        stage = %AnalysisStage::Reflectivity,
        material = %config.mirror.material,
        samples = config.grid.samples,
        "computing reflectivity curve"
    );
    let outcome = ReflectivityStage::new(&FresnelModel)
        .run(&config, &args.output_dir)
        .map_err(CliError::Compute)?;
    for artifact in &outcome.artifacts {
        tracing::info!(artifact = %artifact.relative_path.display(), "artifact written");
    }
    Ok(0)
}

pub(super) fn run_flux_stage(args: AnalysisArgs) -> Result<i32, CliError> {
    let config = load_config(args.config.as_deref())?;
    ensure_output_dir(&args.output_dir)?;

    tracing::info!(
        stage = %AnalysisStage::FluxIngest,
        table = %config.flux_table.path.display(),
        "ingesting measured flux table"
    );
    let outcome = FluxStage::new(&CompositeSimpson)
        .run(&config, &args.output_dir)
        .map_err(CliError::Compute)?;
    for artifact in &outcome.artifacts {
        tracing::info!(artifact = %artifact.relative_path.display(), "artifact written");
    }

    println!();
    println!("{}", render_power_summary(&outcome.summary));
    Ok(0)
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, CliError> {
    let Some(path) = path else {
        let config = AnalysisConfig::quati_m1_platinum();
        config.validate().map_err(CliError::Compute)?;
        return Ok(config);
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read analysis configuration '{}'", path.display()))?;
    AnalysisConfig::from_json_str(&content).map_err(CliError::Compute)
}

fn ensure_output_dir(output_dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(output_dir).map_err(|source| {
        CliError::Compute(MirrorError::io_system(
            "IO.CLI_OUTPUT_DIR",
            format!(
                "failed to create output directory '{}': {}",
                output_dir.display(),
                source
            ),
        ))
    })
}
