//! The drag payload contract.
//!
//! A payload is the snapshot of a dragged item taken when a gesture is armed:
//! identity, display metadata, and provenance. It lives for exactly one
//! gesture. On the wire (the shared drag-and-drop channel) it is a JSON
//! string; anything unparsable is treated as "no payload" and the gesture
//! stays inert.

use serde::{Deserialize, Serialize};

use super::block::ScheduledBlock;
use super::template::ActivityTemplate;

/// Provenance of a dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadOrigin {
    /// Palette template. Also the compatibility default for wire payloads
    /// that omit the field.
    #[default]
    Template,
    /// Saved-list entry.
    Saved,
    /// An already scheduled block; resolving it is a move, not a create.
    Scheduled,
}

/// Snapshot of the dragged item, captured when the gesture is armed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    /// Empty for not-yet-placed templates.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub origin: PayloadOrigin,
}

impl DragPayload {
    pub fn from_template(template: &ActivityTemplate, origin: PayloadOrigin) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            color: template.color.clone(),
            duration_minutes: template.duration_minutes,
            origin,
        }
    }

    pub fn from_scheduled(block: &ScheduledBlock) -> Self {
        Self {
            id: block.id.clone(),
            name: block.name.clone(),
            color: block.color.clone(),
            duration_minutes: block.duration_minutes,
            origin: PayloadOrigin::Scheduled,
        }
    }

    /// A move gesture references a block already in the store.
    pub fn is_move(&self) -> bool {
        self.origin == PayloadOrigin::Scheduled && !self.id.is_empty()
    }

    /// Encode for the shared drag-and-drop channel.
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode from the shared channel. Malformed input yields `None`; the
    /// caller must treat that as an inert gesture.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(payload) if payload.duration_minutes > 0 => Some(payload),
            Ok(_) => {
                log::warn!("Dropping payload with non-positive duration");
                None
            }
            Err(err) => {
                log::warn!("Ignoring unparsable drag payload: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_round_trip() {
        let payload = DragPayload {
            id: "tpl-1".into(),
            name: "Strength".into(),
            color: "#22D3EE".into(),
            duration_minutes: 60,
            origin: PayloadOrigin::Saved,
        };
        let decoded = DragPayload::from_wire(&payload.to_wire()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_wire_uses_camel_case_and_defaults_origin() {
        // Producers that omit origin get the template default.
        let raw = r##"{"id":"","name":"Reading","color":"#8B5CF6","durationMinutes":30}"##;
        let payload = DragPayload::from_wire(raw).unwrap();
        assert_eq!(payload.origin, PayloadOrigin::Template);
        assert_eq!(payload.duration_minutes, 30);
    }

    #[test]
    fn test_malformed_wire_is_no_payload() {
        assert_eq!(DragPayload::from_wire(""), None);
        assert_eq!(DragPayload::from_wire("{not json"), None);
        assert_eq!(DragPayload::from_wire(r#"{"name":"x"}"#), None); // missing duration
    }

    #[test]
    fn test_non_positive_duration_is_no_payload() {
        let raw = r#"{"name":"x","durationMinutes":0}"#;
        assert_eq!(DragPayload::from_wire(raw), None);
        let raw = r#"{"name":"x","durationMinutes":-30}"#;
        assert_eq!(DragPayload::from_wire(raw), None);
    }

    #[test]
    fn test_is_move() {
        let block = ScheduledBlock {
            id: "b9".into(),
            name: "Play".into(),
            color: "#EF4444".into(),
            duration_minutes: 60,
            start_slot: 4,
            day_index: 1,
            date: None,
        };
        assert!(DragPayload::from_scheduled(&block).is_move());

        let tpl = ActivityTemplate::new("Play", "#EF4444", 60).unwrap();
        assert!(!DragPayload::from_template(&tpl, PayloadOrigin::Template).is_move());
    }
}
