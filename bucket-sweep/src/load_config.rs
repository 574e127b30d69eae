use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info};

use bucket_sweep_core::config::{RunConfig, Verbosity};

const ENV_BUCKET: &str = "S3_BUCKET";
const ENV_REGION: &str = "S3_REGION";
const ENV_ID: &str = "S3_ID";
const ENV_SECRET: &str = "S3_SECRET";
const ENV_TOKEN: &str = "S3_TOKEN";
const ENV_LOG: &str = "S3_LOG";

/// Builds the run configuration from the process environment and the root
/// directories given on the command line.
///
/// `S3_BUCKET`, `S3_REGION`, `S3_ID` and `S3_SECRET` are required; a variable
/// that is unset or empty fails with a message naming it. `S3_TOKEN` and
/// `S3_LOG` are optional.
pub fn load_config(roots: Vec<PathBuf>) -> Result<RunConfig> {
    let bucket = require_env(ENV_BUCKET)?;
    let region = require_env(ENV_REGION)?;
    let access_id = require_env(ENV_ID)?;
    let secret = require_env(ENV_SECRET)?;
    let session_token = optional_env(ENV_TOKEN);

    let verbosity = match optional_env(ENV_LOG) {
        Some(keyword) => Verbosity::from(keyword.as_str()),
        None => Verbosity::Quiet,
    };

    if roots.is_empty() {
        error!("No root directories given to upload");
        anyhow::bail!("no root directories given to upload");
    }

    info!(
        bucket = %bucket,
        region = %region,
        roots = roots.len(),
        "Environment configuration loaded"
    );

    Ok(RunConfig {
        bucket,
        region,
        access_id,
        secret,
        session_token,
        verbosity,
        roots,
    })
}

/// Reads a required variable, treating unset and empty alike.
fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => {
            error!(variable = name, "Required environment variable is missing or empty");
            Err(anyhow::anyhow!("{name} is required"))
        }
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
