//! Delivery submission workflow
//!
//! The grading form runs in two steps: identity first, counts second. The
//! steps are modeled as explicit values handed from one to the next instead
//! of ambient session state: a validated [`DeliveryDraft`] holds the identity
//! and transitions into a [`GradedDelivery`] once the sample is graded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::grading::{BunchCounts, FruitCondition, GradingResult};
use crate::models::shipment::ShipmentIdentity;
use crate::validation::{
    validate_driver_name, validate_spb_number, validate_supplier, validate_vehicle_plate,
};

/// Step one of the delivery form: validated identity, no grading yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryDraft {
    pub identity: ShipmentIdentity,
}

impl DeliveryDraft {
    /// Validate the collected identity fields and open a draft
    pub fn new(identity: ShipmentIdentity) -> Result<Self, &'static str> {
        validate_spb_number(&identity.spb_number)?;
        validate_supplier(&identity.supplier)?;
        validate_driver_name(&identity.driver_name)?;
        validate_vehicle_plate(&identity.vehicle_plate)?;
        Ok(Self { identity })
    }

    /// Step two: grade the sampled bunches and close the submission
    pub fn grade(self, total_janjang: i32, counts: BunchCounts) -> Result<GradedDelivery, &'static str> {
        let result = GradingResult::compute(total_janjang, &counts)?;
        Ok(GradedDelivery {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            identity: self.identity,
            counts,
            result,
        })
    }
}

/// A completed, graded delivery ready to be flattened into the audit sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedDelivery {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub identity: ShipmentIdentity,
    pub counts: BunchCounts,
    pub result: GradingResult,
}

/// Timestamp format used in the persisted row
const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl GradedDelivery {
    /// Column order of the audit sheet
    ///
    /// This is an external contract: the order must stay compatible with the
    /// existing spreadsheet. Percentages and deductions are persisted at 4 dp.
    pub fn sheet_header() -> Vec<&'static str> {
        vec![
            "timestamp",
            "spb_number",
            "supplier",
            "driver_name",
            "vehicle_plate",
            "driver_photo_url",
            "total_janjang",
            "mengkal_jjg",
            "overripe_jjg",
            "tikus_jjg",
            "tangkai_jjg",
            "parteno_jjg",
            "mengkal_pct",
            "overripe_pct",
            "tikus_pct",
            "tangkai_pct",
            "parteno_pct",
            "mengkal_potongan",
            "overripe_potongan",
            "tikus_potongan",
            "tangkai_potongan",
            "parteno_potongan",
            "total_potongan_pct",
        ]
    }

    /// Flatten this submission into one sheet row, matching [`sheet_header`]
    ///
    /// [`sheet_header`]: GradedDelivery::sheet_header
    pub fn to_sheet_row(&self) -> Vec<String> {
        let mut row = vec![
            self.submitted_at.format(ROW_TIMESTAMP_FORMAT).to_string(),
            self.identity.spb_number.clone(),
            self.identity.supplier.clone(),
            self.identity.driver_name.clone(),
            self.identity.vehicle_plate.clone(),
            self.identity.driver_photo_url().to_string(),
            self.result.total_janjang.to_string(),
        ];

        for condition in FruitCondition::DEDUCTIBLE {
            row.push(self.counts.count(condition).to_string());
        }
        for condition in FruitCondition::DEDUCTIBLE {
            let pct = self.result.percentage(condition).unwrap_or_default();
            row.push(pct.round_dp(4).normalize().to_string());
        }
        for condition in FruitCondition::DEDUCTIBLE {
            let potongan = self.result.deduction(condition).unwrap_or_default();
            row.push(potongan.round_dp(4).normalize().to_string());
        }
        row.push(self.result.total_deduction_audit().normalize().to_string());

        row
    }
}
