use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use bucket_sweep_core::config::RunConfig;
use bucket_sweep_core::contract::{ObjectStore, PutMetadata, PutRequest, StoreError};

/// S3-backed object store.
///
/// One client, created at startup and reused for every put; transport-level
/// retry and fault handling are the SDK's responsibility.
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Builds the authenticated client from the static credential triple and
    /// region in `config`.
    pub async fn connect(config: &RunConfig) -> Result<Self, StoreError> {
        let credentials = Credentials::new(
            config.access_id.clone(),
            config.secret.clone(),
            config.session_token.clone(),
            None,
            "bucket-sweep",
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        debug!(region = %config.region, "Constructed S3 client");
        Ok(Self {
            client: Client::new(&aws_config),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object<'a>(&self, req: PutRequest<'a>) -> Result<PutMetadata, StoreError> {
        let response = self
            .client
            .put_object()
            .bucket(req.bucket)
            .key(req.key)
            .body(ByteStream::from(req.body))
            .send()
            .await
            .map_err(|e| -> StoreError { format!("Failed to upload to storage: {e}").into() })?;

        Ok(PutMetadata {
            e_tag: response.e_tag().map(|t| t.replace('"', "")),
            version_id: response.version_id().map(str::to_string),
        })
    }
}
