//! # RDC Session Library
//!
//! Client-side state for one submission session: the upload slot tracker,
//! the participant metadata form, the completeness evaluator, and the
//! submission coordinator that packages both into one multipart request.
//!
//! State is held in explicit objects passed between components; nothing
//! here is a process-wide singleton.

pub mod form;
pub mod progress;
pub mod slots;
pub mod submit;

pub use form::MetadataForm;
pub use progress::{evaluate, CompletionState};
pub use slots::{SlotFile, SlotTracker, UploadedImage};
pub use submit::{SubmissionCoordinator, SubmissionOutcome, SubmitError};
