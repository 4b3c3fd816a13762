//! Image storage backends
//!
//! One capability trait with two implementations: local filesystem for
//! development and an S3-compatible object store for production. The
//! backend is chosen once at startup from configuration, never per
//! request.

use async_trait::async_trait;
use rdc_common::config::StorageConfig;
use rdc_common::Result;
use std::sync::Arc;
use tracing::info;

mod local;
mod object;

pub use local::LocalStore;
pub use object::ObjectStore;

/// Storage capability for submitted image bytes
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under `key` ("{participant_id}/{image_type}/{filename}")
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;
}

/// Instantiate the backend named by the configuration
pub fn select_backend(config: &StorageConfig) -> Result<Arc<dyn ImageStore>> {
    let store: Arc<dyn ImageStore> = match config {
        StorageConfig::Local { upload_root } => {
            info!("Image storage: local filesystem at {}", upload_root.display());
            Arc::new(LocalStore::new(upload_root.clone()))
        }
        StorageConfig::Object {
            bucket,
            region,
            endpoint,
            access_token,
        } => {
            info!("Image storage: object store bucket '{}' ({})", bucket, region);
            Arc::new(ObjectStore::new(
                bucket.clone(),
                region.clone(),
                endpoint.clone(),
                access_token.clone(),
            ))
        }
    };
    Ok(store)
}
