//! Fetching annotation images over HTTP

use crate::config::FetchConfig;
use crate::crop::crop_and_save;
use crate::error::FetchError;
use async_trait::async_trait;
use std::path::Path;
use wildex_core::BoundingBox;

/// Stores the cropped annotation of a remote image at `dest`
#[async_trait]
pub trait ImageSaver: Send + Sync {
    async fn save_crop(
        &self,
        image_url: &str,
        bbox: BoundingBox,
        dest: &Path,
    ) -> Result<(), FetchError>;
}

/// Downloads with reqwest and crops on the blocking pool
#[derive(Debug, Clone)]
pub struct HttpImageSaver {
    client: reqwest::Client,
}

impl HttpImageSaver {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Body of a 2xx response
    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageSaver for HttpImageSaver {
    async fn save_crop(
        &self,
        image_url: &str,
        bbox: BoundingBox,
        dest: &Path,
    ) -> Result<(), FetchError> {
        let bytes = self.download(image_url).await?;
        tracing::debug!(url = image_url, bytes = bytes.len(), "Downloaded image");

        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || crop_and_save(&bytes, bbox, &dest)).await?
    }
}
