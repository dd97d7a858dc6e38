use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use crate::device::schema::{Device, NewDevice};
use crate::device::{DeviceError, DeviceResult};

/// Keyed record store for devices. The store assigns ids on insert; the
/// service layer never invents them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn insert(&self, device: NewDevice) -> DeviceResult<Device>;

    async fn find_by_id(&self, id: i64) -> DeviceResult<Option<Device>>;

    /// All persisted devices in id order.
    async fn find_all(&self) -> DeviceResult<Vec<Device>>;

    /// Exact, case-sensitive brand match.
    async fn find_by_brand(&self, brand: &str) -> DeviceResult<Vec<Device>>;

    /// Persists a mutated entity by id. Fails with NotFound when the row has
    /// disappeared between lookup and write.
    async fn update(&self, device: Device) -> DeviceResult<Device>;

    /// No-op when the id is absent; callers check existence first.
    async fn delete_by_id(&self, id: i64) -> DeviceResult<()>;
}

#[derive(Clone)]
pub struct PgDeviceStore {
    pool: PgPool,
}

impl PgDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for PgDeviceStore {
    async fn insert(&self, device: NewDevice) -> DeviceResult<Device> {
        sqlx::query_as::<_, Device>(
            "INSERT INTO device (name, brand, creation_time) VALUES ($1, $2, $3) \
             RETURNING id, name, brand, creation_time",
        )
        .bind(&device.name)
        .bind(&device.brand)
        .bind(device.creation_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            error!("Failed to insert device {err}");
            DeviceError::Store(err.into())
        })
    }

    async fn find_by_id(&self, id: i64) -> DeviceResult<Option<Device>> {
        sqlx::query_as::<_, Device>(
            "SELECT id, name, brand, creation_time FROM device WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            error!("Failed to fetch device {id} {err}");
            DeviceError::Store(err.into())
        })
    }

    async fn find_all(&self) -> DeviceResult<Vec<Device>> {
        sqlx::query_as::<_, Device>(
            "SELECT id, name, brand, creation_time FROM device ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            error!("Failed to fetch devices {err}");
            DeviceError::Store(err.into())
        })
    }

    async fn find_by_brand(&self, brand: &str) -> DeviceResult<Vec<Device>> {
        sqlx::query_as::<_, Device>(
            "SELECT id, name, brand, creation_time FROM device WHERE brand = $1 ORDER BY id",
        )
        .bind(brand)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            error!("Failed to search devices by brand {err}");
            DeviceError::Store(err.into())
        })
    }

    async fn update(&self, device: Device) -> DeviceResult<Device> {
        // Single conditional statement, so a row deleted since the service's
        // lookup surfaces as NotFound instead of silently re-inserting.
        sqlx::query_as::<_, Device>(
            "UPDATE device SET name = $2, brand = $3, creation_time = $4 WHERE id = $1 \
             RETURNING id, name, brand, creation_time",
        )
        .bind(device.id)
        .bind(&device.name)
        .bind(&device.brand)
        .bind(device.creation_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => DeviceError::NotFound(device.id),
            err => {
                error!("Failed to update device {} {err}", device.id);
                DeviceError::Store(err.into())
            }
        })
    }

    async fn delete_by_id(&self, id: i64) -> DeviceResult<()> {
        sqlx::query("DELETE FROM device WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                error!("Failed to delete device {id} {err}");
                DeviceError::Store(err.into())
            })?;

        Ok(())
    }
}
