use chrono::NaiveDateTime;
use thiserror::Error;

pub mod mapper;
pub mod schema;
pub mod service;
pub mod store;

pub use schema::{Device, DeviceRequest, DeviceResponse, NewDevice};

pub type DeviceResult<T> = Result<T, DeviceError>;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device not found with id: {0}")]
    NotFound(i64),

    #[error("creation time must match the pattern yyyy-MM-ddTHH:mm:ss, got: {0}")]
    InvalidCreationTime(String),

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Time source for creation-time defaulting. Injected so tests can pin the
/// clock and assert exact timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock local time, matching what gets persisted (timestamps carry no
/// timezone).
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
