//! S3-compatible object storage (production mode)
//!
//! Speaks the plain S3 REST PUT interface over HTTP. A configured
//! `endpoint` selects path-style addressing (MinIO and other gateways);
//! without one the virtual-host AWS endpoint for the region is used.

use super::ImageStore;
use async_trait::async_trait;
use rdc_common::{Error, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

pub struct ObjectStore {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ObjectStore {
    pub fn new(
        bucket: String,
        region: String,
        endpoint: Option<String>,
        access_token: Option<String>,
    ) -> Self {
        let base_url = match endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
        };
        Self {
            client: reqwest::Client::new(),
            base_url,
            access_token,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl ImageStore for ObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        let url = self.object_url(key);
        let mut request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec());

        if let Some(token) = &self.access_token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Storage(format!("PUT {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "PUT {} returned {}",
                url,
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_endpoint_uses_path_style_addressing() {
        let store = ObjectStore::new(
            "research-intake".to_string(),
            "eu-west-1".to_string(),
            Some("http://minio.internal:9000".to_string()),
            None,
        );
        assert_eq!(
            store.object_url("p1/skin1/a.png"),
            "http://minio.internal:9000/research-intake/p1/skin1/a.png"
        );
    }

    #[test]
    fn default_endpoint_is_the_regional_virtual_host() {
        let store = ObjectStore::new(
            "research-intake".to_string(),
            "eu-west-1".to_string(),
            None,
            None,
        );
        assert_eq!(
            store.object_url("k"),
            "https://research-intake.s3.eu-west-1.amazonaws.com/k"
        );
    }
}
