//! High-level pipeline: wires the traversal producer to the upload consumer.
//!
//! This module owns the run lifecycle:
//!   - Validates the [`RunConfig`] before any filesystem or network I/O
//!   - Spawns one concurrent walker task that streams discovered files into
//!     a bounded channel and closes it after the last root
//!   - Drives a single consumption loop that filters, uploads and logs each
//!     target until the channel closes
//!   - Aggregates and returns a [`RunSummary`] for the whole sweep
//!
//! # Error Handling
//! A config that fails validation returns `Err` immediately. Everything after
//! that is best-effort: a root that cannot be walked or a file that cannot be
//! uploaded produces exactly one error log and the run continues, still
//! finishing with `Ok`.
//!
//! # Callable From
//! Used by the CLI crate with the real S3 store, and by integration tests
//! with the exported mock.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::config::{RunConfig, Verbosity};
use crate::contract::ObjectStore;
use crate::filter::should_skip;
use crate::walker::{self, UploadTarget};
use crate::worker::{UploadOutcome, UploadWorker};

/// Backpressure bound between the walker and the consumer.
const CHANNEL_CAPACITY: usize = 32;

/// Accounting for one completed run, reported once at the end.
#[derive(Debug)]
pub struct RunSummary {
    pub started: Instant,
    pub finished: Instant,
    pub uploaded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn elapsed(&self) -> Duration {
        self.finished.duration_since(self.started)
    }
}

/// Entrypoint: sweep every configured root into the bucket.
pub async fn run<S>(config: &RunConfig, store: &S) -> Result<RunSummary, String>
where
    S: ObjectStore + Sync,
{
    validate(config)?;

    let started = Instant::now();
    info!(bucket = %config.bucket, roots = config.roots.len(), "Starting sweep");

    let (tx, mut rx) = mpsc::channel::<UploadTarget>(CHANNEL_CAPACITY);
    let producer = tokio::spawn(walker::walk_roots(config.roots.clone(), tx));

    let worker = UploadWorker::new(store, &config.bucket);
    let mut uploaded = 0usize;
    let mut failed = 0usize;
    let mut skipped = 0usize;

    // The loop ends when the walker has finished every root and dropped its
    // sender; each received target is attempted exactly once.
    while let Some(target) = rx.recv().await {
        let file_name = target
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if should_skip(file_name, false) {
            debug!(path = %target.path.display(), "Skipping hidden file");
            skipped += 1;
            continue;
        }

        match worker.upload(&target).await {
            UploadOutcome::Uploaded(meta) => {
                uploaded += 1;
                if config.verbosity >= Verbosity::Verbose {
                    info!(key = %target.key, "upload succeeded");
                }
                if config.verbosity >= Verbosity::Trace {
                    match serde_json::to_string_pretty(&meta) {
                        Ok(json) => {
                            info!(json = %json, key = %target.key, "upload response metadata")
                        }
                        Err(e) => {
                            error!(key = %target.key, error = ?e, "Failed to serialize response metadata")
                        }
                    }
                }
            }
            UploadOutcome::Failed(e) => {
                failed += 1;
                error!(path = %target.path.display(), error = ?e, "upload failed");
            }
        }
    }

    // Stream closure already implies the walker is done; join to surface a
    // panic rather than swallow it.
    if let Err(e) = producer.await {
        error!(error = ?e, "Walker task did not complete cleanly");
    }

    let summary = RunSummary {
        started,
        finished: Instant::now(),
        uploaded,
        failed,
        skipped,
    };
    info!(
        elapsed = ?summary.elapsed(),
        uploaded = summary.uploaded,
        failed = summary.failed,
        skipped = summary.skipped,
        "Sweep done"
    );
    Ok(summary)
}

/// Rejects an unusable config before any traversal or upload begins.
fn validate(config: &RunConfig) -> Result<(), String> {
    let required = [
        ("bucket", &config.bucket),
        ("region", &config.region),
        ("access id", &config.access_id),
        ("secret", &config.secret),
    ];
    for (name, value) in required {
        if value.is_empty() {
            return Err(format!("configuration {name} must not be empty"));
        }
    }
    if config.roots.is_empty() {
        return Err("no root directories to upload".to_string());
    }
    Ok(())
}
