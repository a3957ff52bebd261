//! HTTP handlers for delivery submission endpoints
//!
//! Step one validates shipment identity; step two receives the full
//! multipart submission (JSON payload plus optional driver photo).

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::models::DeliveryDraft;
use crate::services::submission::{
    IdentityInput, SubmissionReceipt, SubmitDeliveryInput, UploadedPhoto,
};
use crate::services::SubmissionService;
use crate::AppState;

/// Step one: validate shipment identity and return the opened draft
pub async fn prepare_identity(
    State(state): State<AppState>,
    Json(input): Json<IdentityInput>,
) -> AppResult<Json<DeliveryDraft>> {
    let service = SubmissionService::new(state.sheets.clone(), state.drive.clone());
    let draft = service.prepare_identity(input)?;
    Ok(Json(draft))
}

/// Step two: grade the sample and persist the delivery
///
/// Expects a multipart form with a `payload` JSON part and an optional
/// `driver_photo` file part.
pub async fn submit_delivery(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<SubmissionReceipt>> {
    let mut payload: Option<SubmitDeliveryInput> = None;
    let mut photo: Option<UploadedPhoto> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart form: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("payload") => {
                let text = field.text().await.map_err(|e| {
                    AppError::ValidationError(format!("Unreadable payload part: {}", e))
                })?;
                payload = Some(serde_json::from_str(&text).map_err(|e| {
                    AppError::ValidationError(format!("Invalid payload JSON: {}", e))
                })?);
            }
            Some("driver_photo") => {
                let filename = field
                    .file_name()
                    .unwrap_or("driver_photo.jpg")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::ValidationError(format!("Unreadable photo part: {}", e))
                })?;
                if !bytes.is_empty() {
                    photo = Some(UploadedPhoto {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let input = payload.ok_or_else(|| AppError::Validation {
        field: "payload".to_string(),
        message: "Missing payload part".to_string(),
        message_id: "Data pengiriman tidak ditemukan".to_string(),
    })?;

    let service = SubmissionService::new(state.sheets.clone(), state.drive.clone());
    let receipt = service.submit(input, photo).await?;
    Ok(Json(receipt))
}
