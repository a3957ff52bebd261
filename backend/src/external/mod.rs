//! External API integrations

pub mod drive;
pub mod google_auth;
pub mod sheets;

pub use drive::DriveClient;
pub use google_auth::{GoogleAuth, ServiceAccountKey};
pub use sheets::SheetsClient;
