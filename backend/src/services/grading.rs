//! TAP grading service
//!
//! Validates sampled counts, runs the deduction computation, and shapes the
//! result for the display and export collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{display_rounded, BunchCounts, FruitCondition, GradingResult};

/// Grading service for delivery samples
#[derive(Clone)]
pub struct GradingService;

/// Input for a grading calculation
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateGradingInput {
    pub total_janjang: i32,
    pub counts: BunchCounts,
}

/// One row of the display table, rounded to 2 dp
#[derive(Debug, Serialize)]
pub struct ConditionDisplayRow {
    pub kondisi: &'static str,
    pub persentase: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potongan: Option<Decimal>,
}

/// Grading response for the display collaborator
#[derive(Debug, Serialize)]
pub struct GradingResponse {
    /// Unrounded computation result
    pub result: GradingResult,
    /// Table rows rounded for display
    pub display: Vec<ConditionDisplayRow>,
    /// Total deduction rounded for display
    pub total_potongan: Decimal,
}

impl GradingService {
    /// Create a new GradingService instance
    pub fn new() -> Self {
        Self
    }

    /// Validate and grade one sample
    pub fn calculate(&self, input: &CalculateGradingInput) -> AppResult<GradingResponse> {
        self.validate_grading_input(input.total_janjang, &input.counts)?;

        let result = GradingResult::compute(input.total_janjang, &input.counts)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let display = result
            .conditions
            .iter()
            .map(|c| ConditionDisplayRow {
                kondisi: c.condition.label(),
                persentase: display_rounded(c.percentage),
                potongan: c.deduction.map(display_rounded),
            })
            .collect();

        let total_potongan = result.total_deduction_display();

        Ok(GradingResponse {
            result,
            display,
            total_potongan,
        })
    }

    /// Validate grading input fields
    pub(crate) fn validate_grading_input(
        &self,
        total_janjang: i32,
        counts: &BunchCounts,
    ) -> AppResult<()> {
        if total_janjang < 1 {
            return Err(AppError::Validation {
                field: "total_janjang".to_string(),
                message: "Total sampled bunches must be at least 1".to_string(),
                message_id: "Masukkan total janjang yang valid!".to_string(),
            });
        }

        for condition in FruitCondition::ALL {
            if counts.count(condition) < 0 {
                return Err(AppError::Validation {
                    field: condition.field_name().to_string(),
                    message: format!("{} count cannot be negative", condition),
                    message_id: format!("Jumlah janjang {} tidak boleh negatif", condition),
                });
            }
        }

        Ok(())
    }
}

impl Default for GradingService {
    fn default() -> Self {
        Self::new()
    }
}
