//! Google Drive client for driver photo uploads
//!
//! Uploads into a configured folder and returns a shareable link. The rest
//! of the system treats the returned URL as an opaque string.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::external::google_auth::GoogleAuth;

const MULTIPART_BOUNDARY: &str = "tap_grading_photo_upload";

/// Google Drive API client
#[derive(Clone)]
pub struct DriveClient {
    client: Client,
    auth: GoogleAuth,
    folder_id: String,
    upload_url: String,
    files_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    id: String,
    web_view_link: Option<String>,
}

impl DriveClient {
    /// Create a new DriveClient
    pub fn new(auth: GoogleAuth, folder_id: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            client,
            auth,
            folder_id,
            upload_url: "https://www.googleapis.com/upload/drive/v3/files".to_string(),
            files_url: "https://www.googleapis.com/drive/v3/files".to_string(),
        }
    }

    /// Create a new DriveClient with custom endpoints (for testing)
    pub fn with_base_urls(
        auth: GoogleAuth,
        folder_id: String,
        upload_url: String,
        files_url: String,
    ) -> Self {
        let mut client = Self::new(auth, folder_id);
        client.upload_url = upload_url;
        client.files_url = files_url;
        client
    }

    /// Upload a photo and return its shareable link
    pub async fn upload_photo(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<String> {
        let token = self.auth.access_token().await?;

        let url = format!(
            "{}?uploadType=multipart&fields=id,webViewLink",
            self.upload_url
        );
        let body = multipart_related_body(filename, &self.folder_id, content_type, bytes);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::DriveApi(format!("upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::DriveApi(format!("{} - {}", status, body)));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::DriveApi(format!("invalid upload response: {}", e)))?;

        self.share_with_anyone(&uploaded.id, &token).await?;

        Ok(uploaded
            .web_view_link
            .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", uploaded.id)))
    }

    /// Grant anyone-with-link read access so the sheet link stays viewable
    async fn share_with_anyone(&self, file_id: &str, token: &str) -> AppResult<()> {
        let url = format!("{}/{}/permissions", self.files_url, file_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await
            .map_err(|e| AppError::DriveApi(format!("permission request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::DriveApi(format!("{} - {}", status, body)));
        }

        Ok(())
    }
}

/// Build the multipart/related body: JSON metadata part plus media part
fn multipart_related_body(
    filename: &str,
    folder_id: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Vec<u8> {
    let metadata = json!({
        "name": filename,
        "parents": [folder_id],
    });

    let mut body = Vec::with_capacity(bytes.len() + 512);
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(&bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}
