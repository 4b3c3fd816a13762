//! # RDC Common Library
//!
//! Shared code for the research data-intake workspace:
//! - Error taxonomy
//! - Configuration loading
//! - Database initialization, schema, and persisted models
//! - Participant field definitions and schema validation
//! - Image slot enumeration

pub mod config;
pub mod db;
pub mod error;
pub mod participant;
pub mod slots;

pub use error::{Error, Result};
pub use participant::{FieldViolation, NewParticipant};
pub use slots::ImageSlot;
