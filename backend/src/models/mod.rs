//! Domain models for the TAP Grading Platform backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
