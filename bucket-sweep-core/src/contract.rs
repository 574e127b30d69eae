//! # contract: storage-put interface for upload backends
//!
//! This module defines a single trait ([`ObjectStore`]) and the plain data
//! types that cross it. The implementor owns transport concerns entirely:
//! connection reuse, retries, timeouts. The pipeline only ever asks for one
//! thing, "write these bytes under this key in this bucket", and classifies
//! the answer.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests; the mock is exported
//!   under the `test-export-mocks` feature (on by default).
//!
//! ## Adding New Storage Backends
//! - Implement the trait for your backend.
//! - Convert all meaningful upstream errors into the boxed error type; the
//!   pipeline reports them verbatim and never retries.

use async_trait::async_trait;

use mockall::automock;

/// One put request against the remote bucket.
pub struct PutRequest<'a> {
    /// Destination bucket name.
    pub bucket: &'a str,
    /// Object key. Derived from the local path of the file being uploaded.
    pub key: &'a str,
    /// The raw file contents.
    pub body: Vec<u8>,
}

/// Response metadata returned by the backend for a successful put.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PutMetadata {
    /// Entity tag reported by the backend, quotes stripped.
    pub e_tag: Option<String>,
    /// Object version, when the bucket is versioned.
    pub version_id: Option<String>,
}

/// Uniform error type for storage backends (boxed trait object).
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for writing single objects into a bucket.
///
/// The trait is `Send` + `Sync` and intended for async/await usage. One
/// invocation performs exactly one upload attempt; retry policy, if any,
/// lives inside the implementor.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write one object. Returns backend response metadata on success.
    async fn put_object<'a>(&self, req: PutRequest<'a>) -> Result<PutMetadata, StoreError>;
}
