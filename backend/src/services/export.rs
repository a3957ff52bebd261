//! CSV export for grading results

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{display_rounded, GradingResult};

/// Filename offered for the grading table download
pub const GRADING_CSV_FILENAME: &str = "tap_grading.csv";

/// Export service for delimited-text downloads
#[derive(Clone)]
pub struct ExportService;

/// One condition/percentage/deduction triple, rounded for display
#[derive(Debug, Serialize)]
pub struct GradingCsvRow {
    #[serde(rename = "Kondisi")]
    pub kondisi: &'static str,
    #[serde(rename = "Persentase (%)")]
    pub persentase: Decimal,
    #[serde(rename = "Potongan (%)")]
    pub potongan: Option<Decimal>,
}

impl ExportService {
    /// Export any serializable rows to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        for row in data {
            wtr.serialize(row)
                .map_err(|e| AppError::Internal(format!("CSV serialization failed: {}", e)))?;
        }

        let csv_data = String::from_utf8(wtr.into_inner().map_err(|e| {
            AppError::Internal(format!("CSV write failed: {}", e))
        })?)
        .map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))?;

        Ok(csv_data)
    }

    /// Flatten a grading result into downloadable rows
    ///
    /// Informational conditions keep an empty deduction cell rather than a
    /// zero so they read as not-deducted.
    pub fn grading_rows(result: &GradingResult) -> Vec<GradingCsvRow> {
        result
            .conditions
            .iter()
            .map(|c| GradingCsvRow {
                kondisi: c.condition.label(),
                persentase: display_rounded(c.percentage),
                potongan: c.deduction.map(display_rounded),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BunchCounts, FruitCondition};

    fn graded_sample() -> GradingResult {
        let counts = BunchCounts {
            mengkal: 10,
            over_ripe: 20,
            tikus: 5,
            tangkai_panjang: 2,
            partenocarpic: 3,
            ..Default::default()
        };
        GradingResult::compute(100, &counts).unwrap()
    }

    #[test]
    fn csv_has_header_and_one_row_per_condition() {
        let csv = ExportService::export_to_csv(&ExportService::grading_rows(&graded_sample()))
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Kondisi,Persentase (%),Potongan (%)");
        assert_eq!(lines.len(), 1 + FruitCondition::ALL.len());
    }

    #[test]
    fn csv_rows_are_rounded_for_display() {
        let csv = ExportService::export_to_csv(&ExportService::grading_rows(&graded_sample()))
            .unwrap();

        assert!(csv.contains("Mengkal,10.00,5.00"));
        assert!(csv.contains("Over Ripe,20.00,3.75"));
        assert!(csv.contains("Tangkai Panjang,2.00,0.02"));
    }

    #[test]
    fn informational_conditions_have_empty_potongan_cell() {
        let csv = ExportService::export_to_csv(&ExportService::grading_rows(&graded_sample()))
            .unwrap();

        // Percentage present, deduction cell empty
        assert!(csv.contains("Sampah,0.00,\n") || csv.contains("Sampah,0.00,\r\n"));
    }
}
