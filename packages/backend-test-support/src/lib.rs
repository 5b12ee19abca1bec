//! Backend test support utilities
//!
//! Helpers shared by the backend's unit and integration tests: idempotent
//! logging initialization, in-memory log capture, envelope readers, and a
//! service caller that turns middleware errors into responses.

pub mod envelope;
pub mod logging;
pub mod service;
