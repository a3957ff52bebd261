//! HTTP handlers for the TAP Grading Platform

pub mod grading;
pub mod health;
pub mod submission;

pub use grading::calculate_grading;
pub use health::health_check;
pub use submission::{prepare_identity, submit_delivery};
