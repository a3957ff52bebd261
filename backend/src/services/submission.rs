//! Delivery submission service
//!
//! Orchestrates the two-step delivery flow: identity validation, optional
//! driver photo upload, grading, and the audit sheet append.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::{DriveClient, SheetsClient};
use crate::models::{BunchCounts, DeliveryDraft, GradedDelivery, ShipmentIdentity};
use crate::services::grading::GradingService;
use shared::{validate_vehicle_plate, MediaReference};

/// Delivery submission service
#[derive(Clone)]
pub struct SubmissionService {
    sheets: SheetsClient,
    drive: DriveClient,
}

/// Step one input: shipment identity as captured at the weighbridge
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdentityInput {
    pub delivery_date: NaiveDate,
    #[validate(length(max = 30))]
    pub spb_number: String,
    #[validate(length(max = 100))]
    pub supplier: String,
    #[validate(length(max = 100))]
    pub driver_name: String,
    #[validate(length(max = 12))]
    pub vehicle_plate: String,
}

/// Step two input: the full submission
#[derive(Debug, Deserialize)]
pub struct SubmitDeliveryInput {
    pub identity: IdentityInput,
    pub total_janjang: i32,
    pub counts: BunchCounts,
}

/// Driver photo received from the form
pub struct UploadedPhoto {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Receipt returned to the form after a successful submission
#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub spb_number: String,
    /// Total deduction rounded for display
    pub total_potongan: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_photo_url: Option<String>,
    pub message_en: String,
    pub message_id: String,
}

impl SubmissionService {
    /// Create a new SubmissionService instance
    pub fn new(sheets: SheetsClient, drive: DriveClient) -> Self {
        Self { sheets, drive }
    }

    /// Step one: validate the shipment identity and open a draft
    pub fn prepare_identity(&self, input: IdentityInput) -> AppResult<DeliveryDraft> {
        self.validate_identity(&input)?;

        let draft = DeliveryDraft::new(ShipmentIdentity {
            delivery_date: input.delivery_date,
            spb_number: input.spb_number.trim().to_string(),
            supplier: input.supplier.trim().to_string(),
            driver_name: input.driver_name.trim().to_string(),
            vehicle_plate: input.vehicle_plate.trim().to_string(),
            driver_photo: None,
        })
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

        Ok(draft)
    }

    /// Step two: upload the photo, grade the sample, append the audit row
    pub async fn submit(
        &self,
        input: SubmitDeliveryInput,
        photo: Option<UploadedPhoto>,
    ) -> AppResult<SubmissionReceipt> {
        // Reject bad input before touching any external service
        self.validate_identity(&input.identity)?;
        GradingService::new().validate_grading_input(input.total_janjang, &input.counts)?;

        let driver_photo = match photo {
            Some(p) => {
                let url = self
                    .drive
                    .upload_photo(&p.filename, &p.content_type, p.bytes)
                    .await?;
                tracing::info!(filename = %p.filename, "Driver photo uploaded");
                Some(MediaReference::photo(url, Some(p.filename)))
            }
            None => None,
        };

        let identity = ShipmentIdentity {
            delivery_date: input.identity.delivery_date,
            spb_number: input.identity.spb_number.trim().to_string(),
            supplier: input.identity.supplier.trim().to_string(),
            driver_name: input.identity.driver_name.trim().to_string(),
            vehicle_plate: input.identity.vehicle_plate.trim().to_string(),
            driver_photo,
        };

        let graded = DeliveryDraft::new(identity)
            .map_err(|e| AppError::ValidationError(e.to_string()))?
            .grade(input.total_janjang, input.counts)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        self.sheets
            .append_submission(&GradedDelivery::sheet_header(), &graded.to_sheet_row())
            .await?;

        tracing::info!(
            spb_number = %graded.identity.spb_number,
            total_potongan = %graded.result.total_deduction_display(),
            "Delivery graded and saved"
        );

        Ok(SubmissionReceipt {
            id: graded.id,
            spb_number: graded.identity.spb_number.clone(),
            total_potongan: graded.result.total_deduction_display(),
            driver_photo_url: graded.identity.driver_photo.as_ref().map(|p| p.url.clone()),
            message_en: "Grading saved to the audit sheet".to_string(),
            message_id: "Berhasil menyimpan ke Google Sheets!".to_string(),
        })
    }

    /// Validate identity fields with user-facing bilingual messages
    fn validate_identity(&self, input: &IdentityInput) -> AppResult<()> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if input.spb_number.trim().is_empty() {
            return Err(AppError::Validation {
                field: "spb_number".to_string(),
                message: "SPB number is required".to_string(),
                message_id: "Nomor SPB wajib diisi".to_string(),
            });
        }

        if input.supplier.trim().is_empty() {
            return Err(AppError::Validation {
                field: "supplier".to_string(),
                message: "Supplier is required".to_string(),
                message_id: "Nama kebun/supplier wajib diisi".to_string(),
            });
        }

        if input.driver_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "driver_name".to_string(),
                message: "Driver name is required".to_string(),
                message_id: "Nama supir wajib diisi".to_string(),
            });
        }

        if let Err(e) = validate_vehicle_plate(&input.vehicle_plate) {
            return Err(AppError::Validation {
                field: "vehicle_plate".to_string(),
                message: e.to_string(),
                message_id: "Nomor polisi kendaraan tidak valid".to_string(),
            });
        }

        Ok(())
    }
}
