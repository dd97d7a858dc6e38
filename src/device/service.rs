use std::sync::Arc;

use tracing::{debug, instrument};

use crate::device::schema::{Device, DeviceRequest, DeviceResponse};
use crate::device::store::DeviceStore;
use crate::device::{mapper, Clock, DeviceError, DeviceResult};

/// Business-rule orchestration over the store. Owns the not-found policy and
/// the full-vs-partial merge semantics; all representation conversions go
/// through the mapper. No state is carried across operations.
pub struct DeviceService {
    store: Arc<dyn DeviceStore>,
    clock: Arc<dyn Clock>,
}

impl DeviceService {
    pub fn new(store: Arc<dyn DeviceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[instrument(skip(self, request))]
    pub async fn add_device(&self, request: DeviceRequest) -> DeviceResult<DeviceResponse> {
        debug!(?request, "adding device");

        let entity = mapper::to_entity(&request, self.clock.now())?;
        let device = self.store.insert(entity).await?;
        Ok(mapper::to_response(&device))
    }

    #[instrument(skip(self))]
    pub async fn get_device_by_id(&self, id: i64) -> DeviceResult<DeviceResponse> {
        let device = self.find_device_by_id(id).await?;
        Ok(mapper::to_response(&device))
    }

    #[instrument(skip(self))]
    pub async fn get_all_devices(&self) -> DeviceResult<Vec<DeviceResponse>> {
        let devices = self.store.find_all().await?;
        Ok(devices.iter().map(mapper::to_response).collect())
    }

    /// Full update: every supplied field overwrites, and a missing or empty
    /// creation time resets to "now".
    #[instrument(skip(self, request))]
    pub async fn update_device(
        &self,
        id: i64,
        request: DeviceRequest,
    ) -> DeviceResult<DeviceResponse> {
        self.apply_update(id, request, true).await
    }

    /// Partial update: only supplied fields change; the creation time is
    /// never touched implicitly.
    #[instrument(skip(self, request))]
    pub async fn update_device_partially(
        &self,
        id: i64,
        request: DeviceRequest,
    ) -> DeviceResult<DeviceResponse> {
        self.apply_update(id, request, false).await
    }

    #[instrument(skip(self))]
    pub async fn delete_device(&self, id: i64) -> DeviceResult<()> {
        // Existence check first: deleting an unknown id is an error, not a
        // silent no-op.
        self.find_device_by_id(id).await?;
        self.store.delete_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn search_device_by_brand(&self, brand: &str) -> DeviceResult<Vec<DeviceResponse>> {
        debug!(brand, "searching devices by brand");

        let devices = self.store.find_by_brand(brand).await?;
        Ok(devices.iter().map(mapper::to_response).collect())
    }

    async fn apply_update(
        &self,
        id: i64,
        request: DeviceRequest,
        full_update: bool,
    ) -> DeviceResult<DeviceResponse> {
        let mut device = self.find_device_by_id(id).await?;
        self.merge_fields(&mut device, &request, full_update)?;
        let device = self.store.update(device).await?;
        Ok(mapper::to_response(&device))
    }

    fn merge_fields(
        &self,
        device: &mut Device,
        request: &DeviceRequest,
        full_update: bool,
    ) -> DeviceResult<()> {
        if let Some(name) = &request.name {
            device.name = name.clone();
        }

        if let Some(brand) = &request.brand {
            device.brand = brand.clone();
        }

        match request.creation_time.as_deref() {
            Some(text) if !text.is_empty() => {
                device.creation_time = mapper::parse_creation_time(text)?;
            }
            // A full update with no explicit timestamp means "replace with
            // now"; a partial update leaves the stored value alone.
            _ if full_update => device.creation_time = self.clock.now(),
            _ => {}
        }

        Ok(())
    }

    async fn find_device_by_id(&self, id: i64) -> DeviceResult<Device> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(DeviceError::NotFound(id))
    }
}
