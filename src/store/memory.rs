use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Device, Item, Setting, Store};
use crate::error::StoreError;

/// Process-local store for development without a database, and for tests.
#[derive(Default)]
pub struct MemoryStore {
    settings: RwLock<HashMap<String, Setting>>,
    devices: RwLock<HashMap<String, Device>>,
    items: RwLock<HashMap<String, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_setting(&self, key: &str) -> Result<Option<Setting>, StoreError> {
        Ok(self.settings.read().await.get(key).cloned())
    }

    async fn put_setting(&self, key: &str, setting: &Setting) -> Result<(), StoreError> {
        self.settings
            .write()
            .await
            .insert(key.to_string(), setting.clone());
        Ok(())
    }

    async fn get_device(&self, device_id: &str) -> Result<Option<Device>, StoreError> {
        Ok(self.devices.read().await.get(device_id).cloned())
    }

    async fn put_device(&self, device: &Device) -> Result<(), StoreError> {
        self.devices
            .write()
            .await
            .insert(device.device_id.clone(), device.clone());
        Ok(())
    }

    async fn get_item(&self, name: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.items.read().await.get(name).cloned())
    }

    async fn put_item(&self, item: &Item) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .insert(item.name.clone(), item.clone());
        Ok(())
    }
}
