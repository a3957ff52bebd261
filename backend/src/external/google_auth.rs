//! Google service-account authentication
//!
//! Exchanges an RS256-signed JWT assertion for an OAuth access token. The
//! key file is injected through configuration; nothing here reads ambient
//! credentials.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Scopes required for the audit sheet and photo uploads
const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";

/// Tokens are refreshed this long before their actual expiry
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// Parsed service-account key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    /// Load and parse the key JSON from the configured path
    pub fn from_file(path: &str) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Cannot read service account key {}: {}", path, e))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Configuration(format!("Invalid service account key: {}", e)))
    }
}

/// JWT claims for the service-account assertion
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Token provider shared by the Sheets and Drive clients
#[derive(Clone)]
pub struct GoogleAuth {
    key: Arc<ServiceAccountKey>,
    http: Client,
    cached: Arc<Mutex<Option<CachedToken>>>,
}

impl GoogleAuth {
    /// Create a new GoogleAuth provider
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key: Arc::new(key),
            http: Client::new(),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Current access token, refreshed when close to expiry
    pub async fn access_token(&self) -> AppResult<String> {
        if let Ok(guard) = self.cached.lock() {
            if let Some(cached) = guard.as_ref() {
                if cached.expires_at > Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECONDS) {
                    return Ok(cached.token.clone());
                }
            }
        }

        let assertion = self.signed_assertion()?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Token exchange error: {} - {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Invalid token response: {}", e)))?;

        if let Ok(mut guard) = self.cached.lock() {
            *guard = Some(CachedToken {
                token: token.access_token.clone(),
                expires_at: Utc::now() + Duration::seconds(token.expires_in),
            });
        }

        Ok(token.access_token)
    }

    /// Build and sign the JWT assertion for the token exchange
    fn signed_assertion(&self) -> AppResult<String> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SCOPES,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| AppError::Configuration(format!("Invalid private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign assertion: {}", e)))
    }
}
