use crate::config::AppConfig;
use crate::storage::{PublicBucket, Storage, StorageClient};
use crate::store::{MemoryStore, PgStore, Store};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match &config.database_url {
            Some(url) => Arc::new(PgStore::connect(url).await?) as Arc<dyn Store>,
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory store");
                Arc::new(MemoryStore::new()) as Arc<dyn Store>
            }
        };

        let storage = match &config.s3 {
            Some(s3) => {
                Arc::new(Storage::new(s3, &config.image_bucket).await?) as Arc<dyn StorageClient>
            }
            None => Arc::new(PublicBucket::new(
                &config.image_base_url,
                &config.image_bucket,
            )) as Arc<dyn StorageClient>,
        };

        Ok(Self {
            store,
            config,
            storage,
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            default_device_id: crate::config::DEFAULT_DEVICE_ID.into(),
            display_utc_offset_hours: 0,
            image_bucket: "test-bucket".into(),
            image_base_url: "https://fake.local".into(),
            s3: None,
        });

        let storage = Arc::new(PublicBucket::new(
            &config.image_base_url,
            &config.image_bucket,
        )) as Arc<dyn StorageClient>;
        Self {
            store: Arc::new(MemoryStore::new()),
            config,
            storage,
        }
    }

    #[cfg(test)]
    pub fn fake_unreachable() -> Self {
        Self {
            store: Arc::new(crate::store::UnreachableStore),
            ..Self::fake()
        }
    }
}
