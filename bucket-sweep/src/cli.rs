use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::load_config::load_config;
use crate::store::S3Store;
use bucket_sweep_core::pipeline;

/// CLI for bucket-sweep: recursively upload directory trees to an S3 bucket.
#[derive(Parser)]
#[clap(
    name = "bucket-sweep",
    version,
    about = "Recursively upload the contents of local directory trees to an S3 bucket"
)]
pub struct Cli {
    /// Root directories to upload, walked in the order given
    pub roots: Vec<PathBuf>,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.roots)?;
    config.trace_loaded();

    let store = S3Store::connect(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to construct S3 client: {e}"))?;

    println!("Uploading...");
    match pipeline::run(&config, &store).await {
        Ok(summary) => {
            // Individual upload failures are already reported; the sweep as a
            // whole still counts as a completed run.
            println!(
                "Done in {:.2?}: {} uploaded, {} failed, {} skipped.",
                summary.elapsed(),
                summary.uploaded,
                summary.failed,
                summary.skipped
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("[ERROR] Sweep failed: {e}");
            Err(anyhow::Error::msg(e))
        }
    }
}
