use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use melb_price::{pipeline, report, PipelineConfig};

/// Fit a decision tree to house prices and report holdout MSE / R2.
#[derive(Parser, Debug)]
#[command(name = "melb-price")]
#[command(version)]
struct Args {
    /// Input dataset (.csv, .json or .parquet)
    #[arg(default_value = "melb_data.csv")]
    path: PathBuf,

    /// JSON pipeline configuration; flags below override it
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Share of rows held out for evaluation
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Print the metrics as a JSON object
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    // Every failure is reported on stdout; the exit status stays 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            println!("Erro na execução: {}", usage_error_message(&e));
            return;
        }
    };

    if let Err(e) = run(&args) {
        println!("Erro na execução: {e:#}");
    }
}

/// First line of clap's report, without its `error: ` prefix.
fn usage_error_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(fraction) = args.test_fraction {
        config.test_fraction = fraction;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let evaluation = pipeline::run(&args.path, &config)?;

    if args.json {
        println!("{}", serde_json::to_string(&evaluation)?);
    } else {
        println!("{}", report::render(&evaluation));
    }
    Ok(())
}
