mod commands;

use clap::Parser;
use mirrorcalc_core::domain::MirrorError;

pub fn run_from_env() -> i32 {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let mirror_error = error.as_mirror_error();
            eprintln!("{}", mirror_error.diagnostic_line());
            mirror_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("mirrorcalc".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "mirrorcalc",
    about = "X-ray mirror reflectivity and beam power analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Run the full pipeline: reflectivity, plots, flux integration
    Run(commands::AnalysisArgs),
    /// Compute the reflectivity curve and its artifacts only
    Reflectivity(commands::AnalysisArgs),
    /// Ingest the measured flux table and integrate power and flux only
    Flux(commands::AnalysisArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Run(args) => commands::run_full_analysis(args),
        CliCommand::Reflectivity(args) => commands::run_reflectivity_stage(args),
        CliCommand::Flux(args) => commands::run_flux_stage(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(MirrorError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_mirror_error(&self) -> MirrorError {
        match self {
            Self::Usage(message) => {
                MirrorError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => MirrorError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
