//! `esm-case`: build the ESM enclosure and write it as STL.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use esm_case::app::{self, Application, ConsoleUi};
use esm_case::case::CaseParams;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StlFormat {
    Ascii,
    Binary,
}

#[derive(Parser, Debug)]
#[clap(
    name = "esm-case",
    version,
    about = "Builds the Estonian Swearing Machine enclosure and exports it as STL."
)]
struct Cli {
    /// RON file overriding the default case parameters.
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Where to write the mesh.
    #[clap(long, short, default_value = "esm_case.stl")]
    output: PathBuf,

    #[clap(long, value_enum, default_value = "binary")]
    format: StlFormat,

    /// Print the effective parameters as RON and exit.
    #[clap(long)]
    print_config: bool,
}

fn load_params(cli: &Cli) -> Result<CaseParams> {
    match &cli.config {
        Some(path) => CaseParams::load(path)
            .with_context(|| format!("failed to read parameters from {}", path.display())),
        None => Ok(CaseParams::default()),
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let params = load_params(cli)?;
    if cli.print_config {
        println!("{}", params.to_ron_string()?);
        return Ok(());
    }

    let mut application = Application::new(ConsoleUi);
    let report = app::run(&mut application, &params)?;
    let body = application
        .design
        .body(report.body)
        .context("the finished case body is missing")?;
    body.mesh
        .write_stl(&cli.output, &report.name, cli.format == StlFormat::Ascii)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        path = %cli.output.display(),
        triangles = report.triangles,
        "wrote STL"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // `run` already reported build failures in its dialog
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        },
    }
}
