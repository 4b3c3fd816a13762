//! Persisted models
//!
//! Timestamps are stored as RFC 3339 TEXT and surfaced unchanged in API
//! responses. Wire names are camelCase to match the submission format.

use serde::{Deserialize, Serialize};

/// One completed research submission
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub city: String,
    pub country: String,
    pub hair_type: String,
    pub hair_length: String,
    pub hair_density: String,
    pub hair_condition: String,
    pub scalp_type: String,
    pub recent_treatments: String,
    pub treatment_details: Option<String>,
    pub scalp_conditions: String,
    pub condition_details: Option<String>,
    pub submitted_at: String,
}

/// One stored photograph linked to a participant
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantImage {
    pub id: String,
    pub participant_id: String,
    /// Slot token ("skin1" .. "hair2")
    pub image_type: String,
    /// Stored key: relative path under the upload root, or object key
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub uploaded_at: String,
}
