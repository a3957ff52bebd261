//! Google Sheets client for the grading audit trail
//!
//! Appends one flattened row per graded delivery, writing the header row
//! first when the target worksheet is still empty.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::external::google_auth::GoogleAuth;

/// Google Sheets API client
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    auth: GoogleAuth,
    spreadsheet_id: String,
    worksheet: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    values: Option<Vec<Vec<String>>>,
}

impl SheetsClient {
    /// Create a new SheetsClient
    ///
    /// Accepts either a bare spreadsheet id or a full sheet URL as pasted
    /// from the browser.
    pub fn new(auth: GoogleAuth, spreadsheet_id_or_url: &str, worksheet: String) -> AppResult<Self> {
        let spreadsheet_id = parse_spreadsheet_id(spreadsheet_id_or_url).ok_or_else(|| {
            AppError::Configuration(format!(
                "Invalid spreadsheet id or URL: {}",
                spreadsheet_id_or_url
            ))
        })?;

        Ok(Self {
            client: Client::new(),
            auth,
            spreadsheet_id,
            worksheet,
            base_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
        })
    }

    /// Create a new SheetsClient with custom base URL (for testing)
    pub fn with_base_url(
        auth: GoogleAuth,
        spreadsheet_id_or_url: &str,
        worksheet: String,
        base_url: String,
    ) -> AppResult<Self> {
        let mut client = Self::new(auth, spreadsheet_id_or_url, worksheet)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Append a submission row, creating the header row on first write
    pub async fn append_submission(&self, header: &[&str], row: &[String]) -> AppResult<()> {
        if self.worksheet_is_empty().await? {
            let header_row: Vec<String> = header.iter().map(|h| h.to_string()).collect();
            self.append_row(&header_row).await?;
        }
        self.append_row(row).await
    }

    /// Whether the target worksheet has no values at all
    async fn worksheet_is_empty(&self) -> AppResult<bool> {
        let url = format!(
            "{}/{}/values/{}!A1:A1",
            self.base_url, self.spreadsheet_id, self.worksheet
        );

        let token = self.auth.access_token().await?;
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::SheetsApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SheetsApi(format!("{} - {}", status, body)));
        }

        let data: ValuesResponse = response
            .json()
            .await
            .map_err(|e| AppError::SheetsApi(format!("invalid values response: {}", e)))?;

        Ok(data.values.map(|v| v.is_empty()).unwrap_or(true))
    }

    /// Append a single row of user-entered values
    async fn append_row(&self, row: &[String]) -> AppResult<()> {
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.base_url, self.spreadsheet_id, self.worksheet
        );

        let token = self.auth.access_token().await?;
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| AppError::SheetsApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SheetsApi(format!("{} - {}", status, body)));
        }

        Ok(())
    }
}

/// Extract a spreadsheet id from a bare id or a full sheet URL
pub fn parse_spreadsheet_id(input: &str) -> Option<String> {
    let is_id_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';

    if !input.contains('/') {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.chars().all(is_id_char) {
            return Some(trimmed.to_string());
        }
        return None;
    }

    let marker = "/spreadsheets/d/";
    let start = input.find(marker)? + marker.len();
    let id: String = input[start..].chars().take_while(|&c| is_id_char(c)).collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
