use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = String),
    )
)]
pub async fn check() -> Result<Response, StatusCode> {
    Ok(format!("device-api {}", env!("CARGO_PKG_VERSION")).into_response())
}
