use async_trait::async_trait;

use crate::error::StoreError;

mod memory;
mod postgres;
pub mod records;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use records::{Device, Item, Setting};

/// Key of the singleton `Setting` record.
pub const SETTING_KEY: &str = "master";

/// Keyed access to the three record kinds. `Ok(None)` means the key is absent;
/// `Err` is reserved for transport failures.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<Setting>, StoreError>;
    async fn put_setting(&self, key: &str, setting: &Setting) -> Result<(), StoreError>;
    async fn get_device(&self, device_id: &str) -> Result<Option<Device>, StoreError>;
    async fn put_device(&self, device: &Device) -> Result<(), StoreError>;
    async fn get_item(&self, name: &str) -> Result<Option<Item>, StoreError>;
    async fn put_item(&self, item: &Item) -> Result<(), StoreError>;
}

/// Store whose every call fails as if the database were unreachable.
#[cfg(test)]
pub struct UnreachableStore;

#[cfg(test)]
impl UnreachableStore {
    fn down() -> StoreError {
        StoreError::from(sqlx::Error::PoolTimedOut)
    }
}

#[cfg(test)]
#[async_trait]
impl Store for UnreachableStore {
    async fn get_setting(&self, _key: &str) -> Result<Option<Setting>, StoreError> {
        Err(Self::down())
    }
    async fn put_setting(&self, _key: &str, _setting: &Setting) -> Result<(), StoreError> {
        Err(Self::down())
    }
    async fn get_device(&self, _device_id: &str) -> Result<Option<Device>, StoreError> {
        Err(Self::down())
    }
    async fn put_device(&self, _device: &Device) -> Result<(), StoreError> {
        Err(Self::down())
    }
    async fn get_item(&self, _name: &str) -> Result<Option<Item>, StoreError> {
        Err(Self::down())
    }
    async fn put_item(&self, _item: &Item) -> Result<(), StoreError> {
        Err(Self::down())
    }
}
