use anyhow::Context;
use async_trait::async_trait;
use aws_config::{defaults, BehaviorVersion};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    presigning::PresigningConfig,
    Client,
};

use crate::config::S3Config;

/// Resolves bucket object names to URLs a browser can load.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn presign_get(&self, key: &str, seconds: u64) -> anyhow::Result<String>;
}

/// Object key of the latest annotated capture for a device.
pub fn annotated_image_key(device_id: &str) -> String {
    format!("annotated/{}/annotated.jpg", device_id)
}

/// Private S3-compatible bucket, URLs are presigned.
#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
}

impl Storage {
    pub async fn new(cfg: &S3Config, bucket: &str) -> anyhow::Result<Self> {
        let shared = defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(Credentials::new(
                &cfg.access_key,
                &cfg.secret_key,
                None,
                None,
                "static",
            ))
            .endpoint_url(&cfg.endpoint)
            .load()
            .await;

        let conf = S3ConfigBuilder::from(&shared)
            .endpoint_url(&cfg.endpoint)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(conf),
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl StorageClient for Storage {
    async fn presign_get(&self, key: &str, seconds: u64) -> anyhow::Result<String> {
        let req = self.client.get_object().bucket(&self.bucket).key(key);
        let presigned = req
            .presigned(PresigningConfig::expires_in(
                std::time::Duration::from_secs(seconds),
            )?)
            .await
            .context("s3 presign_get")?;
        Ok(presigned.uri().to_string())
    }
}

/// Publicly readable bucket, URLs never expire.
#[derive(Clone)]
pub struct PublicBucket {
    base_url: String,
    bucket: String,
}

impl PublicBucket {
    pub fn new(base_url: &str, bucket: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl StorageClient for PublicBucket {
    async fn presign_get(&self, key: &str, _seconds: u64) -> anyhow::Result<String> {
        Ok(format!("{}/{}/{}", self.base_url, self.bucket, key))
    }
}
