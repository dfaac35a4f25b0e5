use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{Device, Item, Setting, Store};
use crate::error::StoreError;

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        Ok(Self { db })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get_setting(&self, key: &str) -> Result<Option<Setting>, StoreError> {
        let row = sqlx::query_as::<_, Setting>(
            r#"
            SELECT season, period, device_id
            FROM settings
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn put_setting(&self, key: &str, setting: &Setting) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO settings (id, season, period, device_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
               SET season = EXCLUDED.season,
                   period = EXCLUDED.period,
                   device_id = EXCLUDED.device_id
            "#,
        )
        .bind(key)
        .bind(&setting.season)
        .bind(&setting.period)
        .bind(&setting.device_id)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get_device(&self, device_id: &str) -> Result<Option<Device>, StoreError> {
        let row = sqlx::query_as::<_, Device>(
            r#"
            SELECT device_id, unixtime, objects, recommends
            FROM devices
            WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn put_device(&self, device: &Device) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO devices (device_id, unixtime, objects, recommends)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (device_id) DO UPDATE
               SET unixtime = EXCLUDED.unixtime,
                   objects = EXCLUDED.objects,
                   recommends = EXCLUDED.recommends
            "#,
        )
        .bind(&device.device_id)
        .bind(device.unixtime)
        .bind(&device.objects)
        .bind(&device.recommends)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get_item(&self, name: &str) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, Item>(
            r#"
            SELECT name, price, location
            FROM items
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn put_item(&self, item: &Item) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO items (name, price, location)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE
               SET price = EXCLUDED.price,
                   location = EXCLUDED.location
            "#,
        )
        .bind(&item.name)
        .bind(&item.price)
        .bind(&item.location)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
