use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Configuration for one sweep run.
///
/// Constructed once at startup from the process environment and command
/// line, then owned by the caller and read-only for the rest of the run.
#[derive(Debug)]
pub struct RunConfig {
    pub bucket: String,
    pub region: String,
    pub access_id: String,
    pub secret: String,
    pub session_token: Option<String>,
    pub verbosity: Verbosity,
    /// Root directories to walk, in the order they were given.
    pub roots: Vec<PathBuf>,
}

impl RunConfig {
    pub fn trace_loaded(&self) {
        info!(
            bucket = %self.bucket,
            region = %self.region,
            roots_count = self.roots.len(),
            verbosity = ?self.verbosity,
            "Loaded RunConfig"
        );
        debug!(roots = ?self.roots, "RunConfig roots (full debug)");
    }
}

/// Per-upload log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Failures only.
    Quiet,
    /// Plus a one-line confirmation per successful upload.
    Verbose,
    /// Plus the backend's response metadata per successful upload.
    Trace,
}

impl From<&str> for Verbosity {
    fn from(s: &str) -> Self {
        match s {
            "warn" => Verbosity::Quiet,
            "debug" => Verbosity::Verbose,
            "trace" | "info" => Verbosity::Trace,
            other => {
                if !other.is_empty() {
                    warn!(level = other, "Unknown log level keyword, defaulting to quiet");
                }
                Verbosity::Quiet
            }
        }
    }
}
