//! HTTP API handlers for the intake service

pub mod health;
pub mod participants;
pub mod submit;

pub use health::health_routes;
pub use participants::{get_participant, list_participants};
pub use submit::submit;
