//! Submission coordinator
//!
//! Packages the session state into one multipart request against the
//! intake endpoint. One attempt, no retry; a busy flag keeps a session to
//! a single in-flight submission.

use crate::{evaluate, MetadataForm, SlotTracker};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{info, warn};

/// Result of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub participant_id: String,
    pub images_count: u32,
}

/// Why a submission did not produce an outcome
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The session is not submit-ready; the request was never sent
    #[error("Submission blocked: required photos or fields are incomplete")]
    NotReady,

    /// A prior submission from this session has not resolved yet
    #[error("Submission already in progress")]
    InFlight,

    /// Transport-level failure (connection, timeout, protocol)
    #[error("Submission failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered, but not with success
    #[error("Submission failed: {0}")]
    Rejected(String),
}

/// Intake endpoint response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    success: bool,
    participant_id: Option<String>,
    message: Option<String>,
    images_count: Option<u32>,
}

/// Single-flight submission client for one session
pub struct SubmissionCoordinator {
    client: reqwest::Client,
    submit_url: String,
    in_flight: AtomicBool,
}

impl SubmissionCoordinator {
    /// `base_url` is the intake service origin, e.g. "http://127.0.0.1:5810"
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            submit_url: format!("{}/api/submit", base_url.as_ref().trim_end_matches('/')),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit the session. Preconditions: `evaluate(..).submit_ready` must
    /// hold (checked again defensively here) and no prior call from this
    /// coordinator may still be in flight.
    pub async fn submit(
        &self,
        slots: &SlotTracker,
        form: &MetadataForm,
    ) -> Result<SubmissionOutcome, SubmitError> {
        if !evaluate(slots, form).submit_ready {
            return Err(SubmitError::NotReady);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }

        let result = self.send(slots, form).await;
        self.in_flight.store(false, Ordering::Release);
        result
    }

    async fn send(
        &self,
        slots: &SlotTracker,
        form: &MetadataForm,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let mut payload = reqwest::multipart::Form::new()
            .text("participantData", form.to_json().to_string());

        for (slot, image) in slots.iter_filled() {
            let part = reqwest::multipart::Part::bytes(image.file.bytes.clone())
                .file_name(image.file.filename.clone())
                .mime_str(&image.file.content_type)?;
            payload = payload.part(slot.as_str(), part);
        }

        let response = self
            .client
            .post(&self.submit_url)
            .multipart(payload)
            .send()
            .await?;

        let status = response.status();
        let body: SubmitResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Unparseable intake response ({}): {}", status, e);
                return Err(SubmitError::Rejected(format!(
                    "Unexpected response from intake service ({})",
                    status
                )));
            }
        };

        if body.success {
            if let Some(participant_id) = body.participant_id {
                let outcome = SubmissionOutcome {
                    participant_id,
                    images_count: body.images_count.unwrap_or(0),
                };
                info!(
                    "Submission accepted: participant {} ({} images)",
                    outcome.participant_id, outcome.images_count
                );
                return Ok(outcome);
            }
        }

        Err(SubmitError::Rejected(
            body.message
                .unwrap_or_else(|| format!("Submission rejected ({})", status)),
        ))
    }
}
