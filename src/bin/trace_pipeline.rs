//! Command-line runner for trace transform pipelines.
//!
//! Usage:
//!     trace_pipeline run <trace.json | -> [--pretty]
//!     trace_pipeline schema [--pretty]
//!
//! `run` reads a trace object (its `transforms` array declares the chain),
//! applies every transform and writes `{"trace": ..., "stages": [...]}` to
//! stdout. `schema` prints the option schema of every registered transform.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use trace_core::{StageOutcome, Trace};
use trace_transforms::{schema_json, TransformPipeline, TRANSFORM_MODULES};

#[derive(Parser)]
#[command(name = "trace_pipeline")]
#[command(version)]
#[command(about = "Apply declarative transforms to a chart trace", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the trace's transforms and print the rewritten trace
    Run {
        /// Trace JSON file, or `-` for stdin
        input: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the option schema of every registered transform
    Schema {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Serialize)]
struct Report {
    trace: Value,
    stages: Vec<StageOutcome>,
}

fn read_input(input: &Path) -> Result<Value> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read trace from stdin")?;
        return serde_json::from_str(&buf).context("Failed to parse trace JSON from stdin");
    }

    let file = File::open(input)
        .with_context(|| format!("Failed to open trace file {}", input.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse trace JSON in {}", input.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn run(input: &Path, pretty: bool) -> Result<()> {
    let mut trace = Trace::from_value(read_input(input)?).context("Invalid trace")?;

    let pipeline = TransformPipeline::from_trace(&trace).context("Invalid transform spec")?;
    info!(transforms = pipeline.len(), names = ?pipeline.names(), "running pipeline");

    let output = pipeline.run(&mut trace).context("Transform pipeline failed")?;
    info!(length = ?output.final_length(), "pipeline complete");

    let report = Report {
        trace: trace.into_value()?,
        stages: output.stages,
    };
    print_json(&report, pretty)
}

fn schema(pretty: bool) -> Result<()> {
    let mut modules = Map::new();
    for module in TRANSFORM_MODULES {
        modules.insert(module.name.to_string(), schema_json(module.attributes));
    }
    print_json(&Value::Object(modules), pretty)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input, pretty } => run(&input, pretty),
        Commands::Schema { pretty } => schema(pretty),
    }
}
