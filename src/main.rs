//! `floormap-replay`: run a recorded input trace through the viewport engine
//! and print one JSON snapshot per event to stdout.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use floormap::config::{ConfigError, ViewportConfig};
use floormap::engine::EngineCore;
use floormap::entity::{Dataset, DatasetError};
use floormap::trace::{self, TraceError};

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    ConfigJson(serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to encode snapshot: {0}")]
    Encode(serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floormap-replay", about = "Replay a floor map input trace and print camera snapshots")]
struct Cli {
    /// JSON-lines input trace.
    #[arg(long, env = "FLOORMAP_TRACE")]
    trace: PathBuf,

    /// Dataset JSON (array or `{components, version}`); built-in data when omitted.
    #[arg(long, env = "FLOORMAP_DATASET")]
    dataset: Option<PathBuf>,

    /// Viewport config JSON; read from `FLOORMAP_*` variables when omitted.
    #[arg(long, env = "FLOORMAP_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => serde_json::from_str::<ViewportConfig>(&read(path)?).map_err(ReplayError::ConfigJson)?,
        None => ViewportConfig::from_env()?,
    };
    let dataset = match &cli.dataset {
        Some(path) => Dataset::parse(&read(path)?)?,
        None => {
            tracing::info!("no dataset given; using built-in components");
            Dataset::fallback()
        }
    };
    let events = trace::parse_lines(&read(&cli.trace)?)?;

    let mut engine = EngineCore::with_config(config)?;
    engine.load_dataset(dataset);
    let snapshots = trace::replay(&mut engine, &events);
    tracing::info!(events = events.len(), "trace replayed");

    let mut out = BufWriter::new(io::stdout().lock());
    for snap in &snapshots {
        let line = serde_json::to_string(snap).map_err(ReplayError::Encode)?;
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

fn read(path: &PathBuf) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.clone(), source })
}
