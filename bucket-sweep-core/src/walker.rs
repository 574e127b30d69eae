use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, error};
use walkdir::WalkDir;

/// A discovered file queued for upload. Immutable once emitted.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub path: PathBuf,
    /// Storage key: the raw path string as discovered, leading directory
    /// segments included.
    pub key: String,
}

impl UploadTarget {
    pub fn new(path: PathBuf) -> Self {
        let key = path.to_string_lossy().into_owned();
        Self { path, key }
    }
}

/// Walks every root in the order given and streams each non-directory entry
/// into `tx`.
///
/// A root that cannot be fully walked is reported and abandoned; the
/// remaining roots are still walked. The channel closes when this function
/// returns and the sender is dropped, and not before.
pub async fn walk_roots(roots: Vec<PathBuf>, tx: mpsc::Sender<UploadTarget>) {
    for root in &roots {
        debug!(root = %root.display(), "Walking root directory");
        if let Err(e) = walk_root(root, &tx).await {
            error!(root = %root.display(), error = %e, "Failed to walk root directory");
        }
    }
}

/// Depth-first traversal of a single root. The first traversal error aborts
/// this root and is returned to the caller.
async fn walk_root(root: &Path, tx: &mpsc::Sender<UploadTarget>) -> Result<(), walkdir::Error> {
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if tx.send(UploadTarget::new(entry.into_path())).await.is_err() {
            // Receiver gone; nothing left to feed.
            return Ok(());
        }
    }
    Ok(())
}
