use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Persisted device record. The id is assigned by the store on insert and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub creation_time: NaiveDateTime,
}

/// An unsaved device, produced by the mapper before the store has assigned
/// an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDevice {
    pub name: String,
    pub brand: String,
    pub creation_time: NaiveDateTime,
}

/// Wire input. Every field is optional so the same type serves create, full
/// update and partial update; the handlers enforce non-blank name/brand where
/// an operation requires them.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    /// Creation time as text, pattern `yyyy-MM-ddTHH:mm:ss`.
    pub creation_time: Option<String>,
}

impl DeviceRequest {
    /// True when both name and brand are present and non-blank. Create and
    /// full update require this; partial update does not.
    pub fn has_required_fields(&self) -> bool {
        let non_blank = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty())
        };
        non_blank(&self.name) && non_blank(&self.brand)
    }
}

/// Wire output. The creation time is pre-formatted with the fixed pattern.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub creation_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_reject_blank_and_missing() {
        let full = DeviceRequest {
            name: Some("Phone X".to_string()),
            brand: Some("Acme".to_string()),
            creation_time: None,
        };
        assert!(full.has_required_fields());

        let blank_brand = DeviceRequest {
            name: Some("Phone X".to_string()),
            brand: Some("   ".to_string()),
            creation_time: None,
        };
        assert!(!blank_brand.has_required_fields());

        assert!(!DeviceRequest::default().has_required_fields());
    }
}
