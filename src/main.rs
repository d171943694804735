// Command-line entry point for ava2jest.

use anyhow::{Context, Result};
use ava2jest::api::dto::ReportDto;
use ava2jest::application::{ConvertUsecase, FileOutcome};
use ava2jest::domain::config::Config;
use ava2jest::infrastructure::concurrency::build_pool;
use ava2jest::infrastructure::source_loader::SourceLoader;
use ava2jest::infrastructure::{SwcParser, SwcPrinter};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert AVA test files to Jest",
    after_help = "Long lines are not wrapped; run a formatter on the output if line width matters."
)]
struct Cli {
    /// Input source files or folders
    paths: Vec<PathBuf>,

    /// Input source folder(s)
    #[arg(short = 'd', long)]
    folder: Vec<PathBuf>,

    /// Overwrite input files with the converted source
    #[arg(long, conflicts_with = "out_dir")]
    write: bool,

    /// Write converted files below this directory instead of stdout
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write a JSON report of outcomes and diagnostics
    #[arg(long)]
    report: Option<PathBuf>,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Configuration file (defaults to ./ava2jest.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::discover(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Mirror relative inputs below `out_dir`; absolute ones keep only their
/// file name.
fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    if input.is_relative() {
        out_dir.join(input)
    } else {
        out_dir.join(input.file_name().unwrap_or(input.as_os_str()))
    }
}

fn emit(cli: &Cli, outcomes: &[FileOutcome]) -> Result<()> {
    let single = outcomes.len() == 1;
    for outcome in outcomes {
        let Ok(conv) = &outcome.result else { continue };

        if cli.write {
            fs::write(&outcome.path, &conv.output)
                .with_context(|| format!("Failed to write {}", outcome.path.display()))?;
        } else if let Some(out_dir) = &cli.out_dir {
            let target = output_path(out_dir, &outcome.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&target, &conv.output)
                .with_context(|| format!("Failed to write {}", target.display()))?;
        } else {
            if !single {
                println!("// {}", outcome.path.display());
            }
            print!("{}", conv.output);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ava2jest::init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    let inputs: Vec<PathBuf> = cli.paths.iter().chain(&cli.folder).cloned().collect();
    if inputs.is_empty() {
        anyhow::bail!("Please provide at least one input file or --folder <dir>");
    }
    let files = SourceLoader::collect(&inputs)?;
    tracing::info!(files = files.len(), "collected source files");

    let pool = build_pool(cli.jobs)?;
    let usecase = ConvertUsecase {
        parser: &SwcParser,
        printer: &SwcPrinter,
        config: &config,
    };
    let outcomes = usecase.convert_batch(&files, &pool);

    emit(&cli, &outcomes)?;

    let report = ReportDto::from(outcomes.as_slice());
    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    let follow_ups: usize = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|c| c.diagnostics.len())
        .sum();
    tracing::info!(
        converted = report.converted,
        failed = report.failed,
        diagnostics = follow_ups,
        "conversion finished"
    );

    if report.failed > 0 {
        anyhow::bail!("{} of {} file(s) failed to convert", report.failed, report.files.len());
    }
    Ok(())
}
