use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_DEVICE_ID: &str = "picamera01";

/// S3-compatible endpoint used to presign image URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub default_device_id: String,
    pub display_utc_offset_hours: i8,
    pub image_bucket: String,
    pub image_base_url: String,
    pub s3: Option<S3Config>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        let default_device_id = std::env::var("DEFAULT_DEVICE_ID")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DEVICE_ID.into());
        let display_utc_offset_hours = match std::env::var("DISPLAY_UTC_OFFSET_HOURS") {
            Ok(v) => v
                .parse::<i8>()
                .with_context(|| format!("DISPLAY_UTC_OFFSET_HOURS={v}"))?,
            Err(_) => 0,
        };

        let s3 = match std::env::var("S3_ENDPOINT") {
            Ok(endpoint) if !endpoint.is_empty() => Some(S3Config {
                endpoint,
                access_key: std::env::var("S3_ACCESS_KEY").context("S3_ACCESS_KEY")?,
                secret_key: std::env::var("S3_SECRET_KEY").context("S3_SECRET_KEY")?,
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            default_device_id,
            display_utc_offset_hours,
            image_bucket: std::env::var("IMAGE_BUCKET").unwrap_or_else(|_| "iost-images".into()),
            image_base_url: std::env::var("IMAGE_BASE_URL")
                .unwrap_or_else(|_| "https://storage.googleapis.com".into()),
            s3,
        })
    }

    /// Falls back to the configured default device when `device_id` is empty.
    pub fn device_or_default<'a>(&'a self, device_id: &'a str) -> &'a str {
        if device_id.is_empty() {
            &self.default_device_id
        } else {
            device_id
        }
    }
}
