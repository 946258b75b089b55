//! interlinear-seed
//!
//! Loads a normalized token CSV into the SQLite database served by `interlinear-api`.
//!
//! Usage:
//!   interlinear-seed --csv data/sample_tokens.csv --db interlinear.sqlite3
//!   interlinear-seed --csv more.csv --append
//!   interlinear-seed --batch-size 10000 --vacuum

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use interlinear::seed::{DEFAULT_BATCH_SIZE, SeedOptions, seed_from_csv};

#[derive(Debug, Parser)]
#[command(name = "interlinear-seed")]
#[command(about = "Seed the interlinear token table from a normalized CSV")]
struct Args {
  /// Normalized token CSV
  #[arg(long, env = "INTERLINEAR_CSV", default_value = "data/interlinear_tokens.normalized.csv")]
  csv: PathBuf,

  /// SQLite database to create or update
  #[arg(long, env = "INTERLINEAR_DB", default_value = "interlinear.sqlite3")]
  db: PathBuf,

  /// Keep existing rows instead of clearing the table first
  #[arg(long)]
  append: bool,

  /// Rows per insert transaction
  #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
  batch_size: usize,

  /// Run VACUUM after loading
  #[arg(long)]
  vacuum: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let args = Args::parse();
  let options =
    SeedOptions { append: args.append, batch_size: args.batch_size, vacuum: args.vacuum };

  let report = seed_from_csv(&args.csv, &args.db, &options).with_context(|| {
    format!("seeding {} from {}", args.db.display(), args.csv.display())
  })?;

  tracing::info!(
    inserted = report.inserted,
    skipped = report.skipped,
    db = %args.db.display(),
    "seeding complete"
  );
  if report.skipped > 0 {
    tracing::warn!(skipped = report.skipped, "some rows were skipped; see warnings above");
  }

  Ok(())
}
