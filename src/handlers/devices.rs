use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::device::{DeviceError, DeviceRequest, DeviceResponse};
use crate::State;

const DEVICES_TAG: &str = "devices";

#[derive(Deserialize, Debug)]
pub struct BrandFilter {
    pub brand: String,
}

fn error_status(err: DeviceError) -> StatusCode {
    match err {
        DeviceError::NotFound(id) => {
            warn!("Device not found with id: {id}");
            StatusCode::NOT_FOUND
        }
        DeviceError::InvalidCreationTime(text) => {
            warn!("Rejected malformed creation time: {text}");
            StatusCode::BAD_REQUEST
        }
        DeviceError::Store(err) => {
            error!("Store error: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[utoipa::path(
    post,
    path = "/device",
    request_body = DeviceRequest,
    responses(
        (status = StatusCode::CREATED, description = "Device created", body = DeviceResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing name/brand or malformed creation time"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to persist device"),
    ),
    tag = DEVICES_TAG
)]
pub async fn add_device(
    Extension(state): Extension<State>,
    Json(request): Json<DeviceRequest>,
) -> Result<(StatusCode, Json<DeviceResponse>), StatusCode> {
    debug!("Received POST request to add new device: {:?}", request);

    if !request.has_required_fields() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let response = state
        .device_service
        .add_device(request)
        .await
        .map_err(error_status)?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/device/{id}",
    responses(
        (status = StatusCode::OK, description = "Device found", body = DeviceResponse),
        (status = StatusCode::NOT_FOUND, description = "Device not found"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to retrieve device"),
    ),
    tag = DEVICES_TAG
)]
pub async fn get_device_by_id(
    Extension(state): Extension<State>,
    Path(id): Path<i64>,
) -> Result<Json<DeviceResponse>, StatusCode> {
    debug!("Received GET request for device with id: {id}");

    let response = state
        .device_service
        .get_device_by_id(id)
        .await
        .map_err(error_status)?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/device",
    responses(
        (status = StatusCode::OK, description = "List of devices", body = Vec<DeviceResponse>),
        (status = StatusCode::NO_CONTENT, description = "No devices persisted"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to retrieve devices"),
    ),
    tag = DEVICES_TAG
)]
pub async fn get_all_devices(
    Extension(state): Extension<State>,
) -> Result<Response, StatusCode> {
    debug!("Received GET request for all devices");

    let devices = state
        .device_service
        .get_all_devices()
        .await
        .map_err(error_status)?;

    if devices.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(devices).into_response())
}

#[utoipa::path(
    put,
    path = "/device/{id}",
    request_body = DeviceRequest,
    responses(
        (status = StatusCode::OK, description = "Device fully updated", body = DeviceResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing name/brand or malformed creation time"),
        (status = StatusCode::NOT_FOUND, description = "Device not found"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to update device"),
    ),
    tag = DEVICES_TAG
)]
pub async fn update_device(
    Extension(state): Extension<State>,
    Path(id): Path<i64>,
    Json(request): Json<DeviceRequest>,
) -> Result<Json<DeviceResponse>, StatusCode> {
    debug!("Received PUT request for device with id: {id}");

    if !request.has_required_fields() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let response = state
        .device_service
        .update_device(id, request)
        .await
        .map_err(error_status)?;

    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/device/{id}",
    request_body = DeviceRequest,
    responses(
        (status = StatusCode::OK, description = "Device partially updated", body = DeviceResponse),
        (status = StatusCode::BAD_REQUEST, description = "Malformed creation time"),
        (status = StatusCode::NOT_FOUND, description = "Device not found"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to update device"),
    ),
    tag = DEVICES_TAG
)]
pub async fn update_device_partially(
    Extension(state): Extension<State>,
    Path(id): Path<i64>,
    Json(request): Json<DeviceRequest>,
) -> Result<Json<DeviceResponse>, StatusCode> {
    debug!("Received PATCH request for device with id: {id}");

    let response = state
        .device_service
        .update_device_partially(id, request)
        .await
        .map_err(error_status)?;

    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/device/{id}",
    responses(
        (status = StatusCode::NO_CONTENT, description = "Device deleted"),
        (status = StatusCode::NOT_FOUND, description = "Device not found"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to delete device"),
    ),
    tag = DEVICES_TAG
)]
pub async fn delete_device(
    Extension(state): Extension<State>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    debug!("Received DELETE request for device with id: {id}");

    state
        .device_service
        .delete_device(id)
        .await
        .map_err(error_status)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/device/search",
    params(
        ("brand" = String, Query, description = "Exact brand to match"),
    ),
    responses(
        (status = StatusCode::OK, description = "Matching devices", body = Vec<DeviceResponse>),
        (status = StatusCode::NO_CONTENT, description = "No matching devices"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Failed to search devices"),
    ),
    tag = DEVICES_TAG
)]
pub async fn search_device_by_brand(
    Extension(state): Extension<State>,
    filter: Query<BrandFilter>,
) -> Result<Response, StatusCode> {
    debug!("Received GET request to search devices: {:?}", filter);

    let devices = state
        .device_service
        .search_device_by_brand(&filter.brand)
        .await
        .map_err(error_status)?;

    if devices.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(devices).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_maps_domain_errors() {
        assert_eq!(error_status(DeviceError::NotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            error_status(DeviceError::InvalidCreationTime("bogus".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(DeviceError::Store(anyhow::anyhow!("connection reset"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
