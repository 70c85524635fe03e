//! Surveillance event records as seen by the analytics layer.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// A single event to be stored.
///
/// Events are produced upstream (detectors, ingestion); this crate only
/// validates the fields the analytics depend on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewEvent {
    pub ts_utc: Timestamp,
    pub camera_id: String,
    pub event_type: String,
    pub zone: Option<String>,
}

impl NewEvent {
    pub fn new(ts_utc: Timestamp, camera_id: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            ts_utc,
            camera_id: camera_id.into(),
            event_type: event_type.into(),
            zone: None,
        }
    }

    pub fn in_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

/// Reject events whose `camera_id` or `event_type` is blank.
pub fn validate_new_event(event: &NewEvent) -> Result<(), CoreError> {
    if event.camera_id.trim().is_empty() {
        return Err(CoreError::Validation("camera_id must not be empty".into()));
    }
    if event.event_type.trim().is_empty() {
        return Err(CoreError::Validation("event_type must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    #[test]
    fn accepts_well_formed_event() {
        let event = NewEvent::new(Utc::now(), "cam1", "intrusion").in_zone("gate");
        assert!(validate_new_event(&event).is_ok());
        assert_eq!(event.zone.as_deref(), Some("gate"));
    }

    #[test]
    fn rejects_blank_camera() {
        let event = NewEvent::new(Utc::now(), "  ", "intrusion");
        assert_matches!(
            validate_new_event(&event),
            Err(CoreError::Validation(msg)) if msg.contains("camera_id")
        );
    }

    #[test]
    fn rejects_blank_event_type() {
        let event = NewEvent::new(Utc::now(), "cam1", "");
        assert_matches!(
            validate_new_event(&event),
            Err(CoreError::Validation(msg)) if msg.contains("event_type")
        );
    }
}
