// Activity template model
// Reusable activity definitions shown in the palette and saved list

use serde::{Deserialize, Serialize};

use crate::utils::ids;

/// A reusable activity definition (name, color, duration) not yet anchored
/// to a date. Templates live in the palette and the saved list; dropping one
/// onto the board copies its fields into a new scheduled block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub id: String,
    pub name: String,
    /// Accent color as an opaque hex token, e.g. "#6366F1".
    pub color: String,
    pub duration_minutes: i64,
    /// Optional weekly budget in hours for the ledger.
    #[serde(default)]
    pub quota_hours: Option<f32>,
}

impl ActivityTemplate {
    /// Create a new template with required fields.
    ///
    /// # Returns
    /// Returns `Result<ActivityTemplate, String>` with validation.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        duration_minutes: i64,
    ) -> Result<Self, String> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err("Activity name cannot be empty".to_string());
        }
        if duration_minutes < 1 {
            return Err("Duration must be at least 1 minute".to_string());
        }
        if duration_minutes > 24 * 60 {
            return Err("Duration cannot exceed 24 hours".to_string());
        }

        Ok(Self {
            id: ids::next_template_id(),
            name,
            color: color.into(),
            duration_minutes,
            quota_hours: None,
        })
    }

    pub fn with_quota(mut self, quota_hours: f32) -> Self {
        self.quota_hours = Some(quota_hours);
        self
    }

    /// Duplicate this template under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ids::next_template_id(),
            ..self.clone()
        }
    }

    /// Compact duration label for palette chips, e.g. "1h" or "1.5h".
    pub fn duration_label(&self) -> String {
        let hours = self.duration_minutes as f32 / 60.0;
        if (hours - hours.round()).abs() < f32::EPSILON {
            format!("{}h", hours.round() as i64)
        } else {
            format!("{:.1}h", hours)
        }
    }
}
