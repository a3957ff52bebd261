//! Business logic services for the TAP Grading Platform

pub mod export;
pub mod grading;
pub mod submission;

pub use export::ExportService;
pub use grading::GradingService;
pub use submission::SubmissionService;
