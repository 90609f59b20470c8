//! VisKom ID3 Trainer CLI
//!
//! Induces an ID3 decision tree from a categorical CSV file and writes the
//! tree, its visualization graph and a BLAKE3 fingerprint of the tree.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use viskom_ml_core::id3::{self, information_gains, Id3Builder};
use viskom_ml_core::Table;

#[derive(Parser, Debug)]
#[command(name = "id3-train")]
#[command(author = "VisKom Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ID3 decision-tree trainer for categorical CSV datasets", long_about = None)]
struct Args {
    /// Input CSV dataset path (header row, categorical values)
    #[arg(short, long)]
    input: PathBuf,

    /// Target column (defaults to the last column)
    #[arg(short, long)]
    target: Option<String>,

    /// Comma-separated feature columns (defaults to every non-target column)
    #[arg(short, long, value_delimiter = ',')]
    features: Vec<String>,

    /// Output directory for tree, graph and hash
    #[arg(short, long, default_value = "models/id3")]
    output: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    info!("Saving to: {}", path.display());
    std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(json)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("VisKom ID3 Trainer v{}", env!("CARGO_PKG_VERSION"));

    // Load dataset
    info!("Loading dataset from: {}", args.input.display());
    let table = Table::from_csv(&args.input).context("Failed to load dataset")?;

    let target = match args.target {
        Some(target) => target,
        None => table
            .columns()
            .last()
            .cloned()
            .context("Dataset has no columns")?,
    };

    let builder = Id3Builder::new(&table, &target).context("Invalid target column")?;
    let features = if args.features.is_empty() {
        builder.all_features()
    } else {
        args.features
    };

    info!(
        "Loaded {} rows; target '{}' with {} features",
        table.len(),
        target,
        features.len()
    );

    info!("Information gain:");
    for (feature, gain) in information_gains(&table, &features, &target)? {
        info!("  {}: {:.4}", feature, gain);
    }

    // Train tree
    let tree = builder.build(&features).context("Tree induction failed")?;
    let accuracy = id3::accuracy(&tree, &table, &target)?;

    info!("Training complete!");
    info!("  Root: {}", tree.attribute().unwrap_or("<leaf>"));
    info!("  Depth: {}", tree.depth());
    info!("  Leaves: {}", tree.leaf_count());
    info!("  Training accuracy: {:.4}", accuracy);

    // Create output directory
    std::fs::create_dir_all(&args.output).context("Failed to create output directory")?;

    let tree_json = write_json(&args.output.join("tree.json"), &tree)?;
    write_json(&args.output.join("graph.json"), &id3::serialize(&tree))?;

    // Calculate and save BLAKE3 hash
    let hash = blake3::hash(tree_json.as_bytes());
    let hash_hex = hex::encode(hash.as_bytes());

    let hash_path = args.output.join("tree.hash");
    info!("Saving hash to: {}", hash_path.display());
    std::fs::write(&hash_path, &hash_hex).context("Failed to write hash file")?;

    info!("Training completed successfully ({})", hash_hex);

    Ok(())
}
