//! Read endpoints: participant listing and lookup

use axum::extract::{Path, State};
use axum::Json;
use rdc_common::Error;
use serde_json::{json, Value};

use crate::{db, ApiError, AppState};

/// GET /api/participants
///
/// All participants, for research/admin use.
pub async fn list_participants(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let participants = db::all_participants(&state.db).await?;

    Ok(Json(json!({
        "success": true,
        "count": participants.len(),
        "participants": participants,
    })))
}

/// GET /api/participants/:id
///
/// One participant plus its associated images; 404 when the id does not
/// resolve.
pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let participant = db::get_participant(&state.db, &id)
        .await?
        .ok_or_else(|| Error::NotFound("Participant not found".to_string()))?;

    let images = db::participant_images(&state.db, &id).await?;

    Ok(Json(json!({
        "success": true,
        "participant": participant,
        "images": images,
    })))
}
