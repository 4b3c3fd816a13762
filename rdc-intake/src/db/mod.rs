//! Database access layer for the intake service
//!
//! Participants are immutable once created; images are appended after the
//! participant row exists. No update or delete operations are exposed.

use chrono::Utc;
use rdc_common::db::{Participant, ParticipantImage};
use rdc_common::{NewParticipant, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Image metadata ready for insertion, after the bytes were stored
#[derive(Debug)]
pub struct NewImage<'a> {
    pub participant_id: &'a str,
    /// Slot token ("skin1" .. "hair2")
    pub image_type: &'a str,
    /// Stored key (local relative path or object key)
    pub filename: &'a str,
    pub original_name: &'a str,
    pub mime_type: &'a str,
    pub file_size: i64,
}

/// Insert a participant row; the id and timestamp are server-assigned
pub async fn insert_participant(pool: &SqlitePool, new: &NewParticipant) -> Result<Participant> {
    let participant = Participant {
        id: Uuid::new_v4().to_string(),
        name: new.name.clone(),
        age: new.age,
        gender: new.gender.clone(),
        city: new.city.clone(),
        country: new.country.clone(),
        hair_type: new.hair_type.clone(),
        hair_length: new.hair_length.clone(),
        hair_density: new.hair_density.clone(),
        hair_condition: new.hair_condition.clone(),
        scalp_type: new.scalp_type.clone(),
        recent_treatments: new.recent_treatments.clone(),
        treatment_details: new.treatment_details.clone(),
        scalp_conditions: new.scalp_conditions.clone(),
        condition_details: new.condition_details.clone(),
        submitted_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        r#"
        INSERT INTO participants (
            id, name, age, gender, city, country,
            hair_type, hair_length, hair_density, hair_condition, scalp_type,
            recent_treatments, treatment_details, scalp_conditions, condition_details,
            submitted_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&participant.id)
    .bind(&participant.name)
    .bind(participant.age)
    .bind(&participant.gender)
    .bind(&participant.city)
    .bind(&participant.country)
    .bind(&participant.hair_type)
    .bind(&participant.hair_length)
    .bind(&participant.hair_density)
    .bind(&participant.hair_condition)
    .bind(&participant.scalp_type)
    .bind(&participant.recent_treatments)
    .bind(&participant.treatment_details)
    .bind(&participant.scalp_conditions)
    .bind(&participant.condition_details)
    .bind(&participant.submitted_at)
    .execute(pool)
    .await?;

    Ok(participant)
}

/// Load one participant by id
pub async fn get_participant(pool: &SqlitePool, id: &str) -> Result<Option<Participant>> {
    let participant = sqlx::query_as::<_, Participant>(
        "SELECT * FROM participants WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(participant)
}

/// All participants, newest first
pub async fn all_participants(pool: &SqlitePool) -> Result<Vec<Participant>> {
    let participants = sqlx::query_as::<_, Participant>(
        "SELECT * FROM participants ORDER BY submitted_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(participants)
}

/// Insert one image row referencing an existing participant
pub async fn insert_image(pool: &SqlitePool, image: &NewImage<'_>) -> Result<ParticipantImage> {
    let row = ParticipantImage {
        id: Uuid::new_v4().to_string(),
        participant_id: image.participant_id.to_string(),
        image_type: image.image_type.to_string(),
        filename: image.filename.to_string(),
        original_name: image.original_name.to_string(),
        mime_type: image.mime_type.to_string(),
        file_size: image.file_size,
        uploaded_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        r#"
        INSERT INTO participant_images (
            id, participant_id, image_type, filename,
            original_name, mime_type, file_size, uploaded_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&row.id)
    .bind(&row.participant_id)
    .bind(&row.image_type)
    .bind(&row.filename)
    .bind(&row.original_name)
    .bind(&row.mime_type)
    .bind(row.file_size)
    .bind(&row.uploaded_at)
    .execute(pool)
    .await?;

    Ok(row)
}

/// All images linked to a participant, in slot order of insertion
pub async fn participant_images(pool: &SqlitePool, id: &str) -> Result<Vec<ParticipantImage>> {
    let images = sqlx::query_as::<_, ParticipantImage>(
        "SELECT * FROM participant_images WHERE participant_id = ? ORDER BY uploaded_at, image_type",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn test_pool() -> SqlitePool {
        // One connection: every pool checkout must see the same in-memory db
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        rdc_common::db::configure_connection(&pool).await.unwrap();
        rdc_common::db::create_tables(&pool).await.unwrap();
        pool
    }

    fn new_participant() -> NewParticipant {
        NewParticipant::from_json(json!({
            "name": "Test Participant",
            "age": "31",
            "gender": "male",
            "city": "Porto",
            "country": "Portugal",
            "hairType": "curly",
            "hairLength": "short",
            "hairDensity": "medium",
            "hairCondition": "dry",
            "scalpType": "oily",
            "recentTreatments": "no",
            "scalpConditions": "no",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let pool = test_pool().await;
        let created = insert_participant(&pool, &new_participant()).await.unwrap();

        let loaded = get_participant(&pool, &created.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, created.id);
        assert_eq!(loaded.age, 31);
        assert_eq!(loaded.treatment_details, None);
        assert!(!loaded.submitted_at.is_empty());
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let pool = test_pool().await;
        let loaded = get_participant(&pool, "no-such-id").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn image_insert_requires_existing_participant() {
        let pool = test_pool().await;
        let image = NewImage {
            participant_id: "missing",
            image_type: "skin1",
            filename: "missing/skin1/a.png",
            original_name: "a.png",
            mime_type: "image/png",
            file_size: 3,
        };
        assert!(insert_image(&pool, &image).await.is_err());
    }

    #[tokio::test]
    async fn duplicate_image_type_violates_uniqueness() {
        let pool = test_pool().await;
        let participant = insert_participant(&pool, &new_participant()).await.unwrap();

        let image = NewImage {
            participant_id: &participant.id,
            image_type: "hair1",
            filename: "k1",
            original_name: "a.png",
            mime_type: "image/png",
            file_size: 3,
        };
        insert_image(&pool, &image).await.unwrap();

        let duplicate = NewImage { filename: "k2", ..image };
        assert!(insert_image(&pool, &duplicate).await.is_err());
    }
}
