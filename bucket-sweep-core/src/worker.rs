use tracing::debug;

use crate::contract::{ObjectStore, PutMetadata, PutRequest, StoreError};
use crate::walker::UploadTarget;

/// Classified result of a single upload attempt.
#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded(PutMetadata),
    Failed(UploadError),
}

#[derive(Debug)]
pub enum UploadError {
    /// The local file could not be opened or read.
    Read(std::io::Error),
    /// The storage backend rejected the put.
    Put(StoreError),
}

/// Uploads targets one at a time against a single bucket.
pub struct UploadWorker<'a, S> {
    store: &'a S,
    bucket: &'a str,
}

impl<'a, S: ObjectStore> UploadWorker<'a, S> {
    pub fn new(store: &'a S, bucket: &'a str) -> Self {
        Self { store, bucket }
    }

    /// One attempt, no retries. A file that cannot be read never reaches the
    /// store; the local filesystem is never mutated.
    pub async fn upload(&self, target: &UploadTarget) -> UploadOutcome {
        let body = match tokio::fs::read(&target.path).await {
            Ok(body) => body,
            Err(e) => return UploadOutcome::Failed(UploadError::Read(e)),
        };
        debug!(key = %target.key, size = body.len(), "Uploading file");
        let req = PutRequest {
            bucket: self.bucket,
            key: &target.key,
            body,
        };
        match self.store.put_object(req).await {
            Ok(meta) => UploadOutcome::Uploaded(meta),
            Err(e) => UploadOutcome::Failed(UploadError::Put(e)),
        }
    }
}
