//! Conversions between the wire representation and the persisted entity.
//!
//! Both directions are pure; the current time used for defaulting is passed
//! in by the caller.

use chrono::NaiveDateTime;

use crate::device::schema::{Device, DeviceRequest, DeviceResponse, NewDevice};
use crate::device::{DeviceError, DeviceResult};

/// Fixed pattern for creation times, e.g. `2024-09-19T10:00:00`. Local
/// date-time, second precision, no timezone, no fractional seconds.
const CREATION_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_creation_time(text: &str) -> DeviceResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, CREATION_TIME_PATTERN)
        .map_err(|_| DeviceError::InvalidCreationTime(text.to_string()))
}

pub fn format_creation_time(timestamp: NaiveDateTime) -> String {
    timestamp.format(CREATION_TIME_PATTERN).to_string()
}

/// Builds an unsaved entity from a request. The creation time is parsed when
/// supplied and non-empty, otherwise defaulted to `now`. Name and brand are
/// copied verbatim; their presence is the transport layer's concern.
pub fn to_entity(request: &DeviceRequest, now: NaiveDateTime) -> DeviceResult<NewDevice> {
    let creation_time = match request.creation_time.as_deref() {
        Some(text) if !text.is_empty() => parse_creation_time(text)?,
        _ => now,
    };

    Ok(NewDevice {
        name: request.name.clone().unwrap_or_default(),
        brand: request.brand.clone().unwrap_or_default(),
        creation_time,
    })
}

pub fn to_response(device: &Device) -> DeviceResponse {
    DeviceResponse {
        id: device.id,
        name: device.name.clone(),
        brand: device.brand.clone(),
        creation_time: format_creation_time(device.creation_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> NaiveDateTime {
        parse_creation_time("2024-09-19T10:00:00").unwrap()
    }

    #[test]
    fn parse_then_format_round_trips() {
        for text in ["2024-01-01T00:00:00", "1999-12-31T23:59:59", "2024-09-19T10:00:00"] {
            let parsed = parse_creation_time(text).unwrap();
            assert_eq!(format_creation_time(parsed), text);
        }
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for text in [
            "2024-09-19 10:00:00",
            "2024-09-19T10:00",
            "19-09-2024T10:00:00",
            "2024-09-19T10:00:00.123",
            "not a timestamp",
        ] {
            let err = parse_creation_time(text).unwrap_err();
            assert!(matches!(err, DeviceError::InvalidCreationTime(ref t) if t == text));
        }
    }

    #[test]
    fn to_entity_uses_supplied_creation_time() {
        let request = DeviceRequest {
            name: Some("Phone X".to_string()),
            brand: Some("Acme".to_string()),
            creation_time: Some("2024-01-01T00:00:00".to_string()),
        };

        let entity = to_entity(&request, fixed_now()).unwrap();
        assert_eq!(entity.name, "Phone X");
        assert_eq!(entity.brand, "Acme");
        assert_eq!(
            entity.creation_time,
            parse_creation_time("2024-01-01T00:00:00").unwrap()
        );
    }

    #[test]
    fn to_entity_defaults_to_now_when_creation_time_missing_or_empty() {
        let missing = DeviceRequest {
            name: Some("Phone X".to_string()),
            brand: Some("Acme".to_string()),
            creation_time: None,
        };
        assert_eq!(to_entity(&missing, fixed_now()).unwrap().creation_time, fixed_now());

        let empty = DeviceRequest {
            creation_time: Some(String::new()),
            ..missing
        };
        assert_eq!(to_entity(&empty, fixed_now()).unwrap().creation_time, fixed_now());
    }

    #[test]
    fn to_entity_propagates_parse_failure() {
        let request = DeviceRequest {
            name: Some("Phone X".to_string()),
            brand: Some("Acme".to_string()),
            creation_time: Some("01/01/2024".to_string()),
        };

        assert!(matches!(
            to_entity(&request, fixed_now()),
            Err(DeviceError::InvalidCreationTime(_))
        ));
    }

    #[test]
    fn to_response_formats_creation_time() {
        let device = Device {
            id: 7,
            name: "Phone X".to_string(),
            brand: "Acme".to_string(),
            creation_time: parse_creation_time("2024-01-01T00:00:00").unwrap(),
        };

        let response = to_response(&device);
        assert_eq!(response.id, 7);
        assert_eq!(response.name, "Phone X");
        assert_eq!(response.brand, "Acme");
        assert_eq!(response.creation_time, "2024-01-01T00:00:00");
    }
}
