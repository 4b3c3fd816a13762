//! Submission endpoint
//!
//! Accepts one multipart request: a `participantData` JSON part plus up to
//! five file parts named by slot token. File parts are checked (image
//! content type, size ceiling) as they stream in, before any metadata
//! validation or database write. After the participant row exists, images
//! are stored and recorded sequentially; an individual image failure is
//! logged and skipped rather than rolling back the submission.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use rdc_common::{Error, ImageSlot, NewParticipant};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::{self, NewImage};
use crate::{ApiError, AppState};

/// Success response for POST /api/submit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub participant_id: String,
    pub message: String,
    pub images_count: u32,
}

struct ReceivedFile {
    slot: ImageSlot,
    original_name: String,
    content_type: String,
    bytes: Bytes,
}

/// POST /api/submit
pub async fn submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SubmitResponse>, ApiError> {
    info!("Received submission request");

    let mut participant_data: Option<String> = None;
    let mut files: Vec<ReceivedFile> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "participantData" {
            participant_data = Some(field.text().await?);
            continue;
        }

        let Ok(slot) = name.parse::<ImageSlot>() else {
            debug!("Skipping unknown part: {}", name);
            continue;
        };

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(Error::UnsupportedFileType {
                slot: slot.to_string(),
                content_type,
            }
            .into());
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        if bytes.len() > state.max_file_size {
            return Err(Error::FileTooLarge {
                slot: slot.to_string(),
                size: bytes.len(),
                limit: state.max_file_size,
            }
            .into());
        }

        files.push(ReceivedFile {
            slot,
            original_name,
            content_type,
            bytes,
        });
    }

    // A missing metadata part validates like an empty object: every
    // required field is reported missing.
    let raw = participant_data.unwrap_or_else(|| "{}".to_string());
    let data: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| Error::MalformedInput(e.to_string()))?;

    let new_participant = NewParticipant::from_json(data).map_err(Error::Validation)?;

    let participant = db::insert_participant(&state.db, &new_participant).await?;
    info!("Created participant: {}", participant.id);

    let mut images_count = 0u32;
    for file in &files {
        match store_image(&state, &participant.id, file).await {
            Ok(()) => images_count += 1,
            Err(e) => warn!(
                "Image {} for participant {} not saved: {}",
                file.slot, participant.id, e
            ),
        }
    }
    info!(
        "Saved {} images for participant {}",
        images_count, participant.id
    );

    Ok(Json(SubmitResponse {
        success: true,
        participant_id: participant.id,
        message: "Data submitted successfully".to_string(),
        images_count,
    }))
}

/// Write one image to the storage backend, then record its metadata row
async fn store_image(
    state: &AppState,
    participant_id: &str,
    file: &ReceivedFile,
) -> rdc_common::Result<()> {
    let stored_name = stored_filename(file.slot, &file.original_name);
    let key = format!("{}/{}/{}", participant_id, file.slot, stored_name);

    state
        .store
        .put(&key, &file.bytes, &file.content_type)
        .await?;

    db::insert_image(
        &state.db,
        &NewImage {
            participant_id,
            image_type: file.slot.as_str(),
            filename: &key,
            original_name: &file.original_name,
            mime_type: &file.content_type,
            file_size: file.bytes.len() as i64,
        },
    )
    .await?;

    Ok(())
}

/// Collision-free stored filename keeping the original extension
fn stored_filename(slot: ImageSlot, original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    format!(
        "{}-{}-{}{}",
        slot,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension
    )
}
