//! HTTP handlers for grading endpoints

use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::export::{ExportService, GRADING_CSV_FILENAME};
use crate::services::grading::{CalculateGradingInput, GradingService};

#[derive(Debug, Deserialize)]
pub struct CalculateQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Grade a sample and return the result table, as JSON or CSV download
pub async fn calculate_grading(
    Query(query): Query<CalculateQuery>,
    Json(input): Json<CalculateGradingInput>,
) -> AppResult<Response> {
    let service = GradingService::new();
    let response = service.calculate(&input)?;

    if query.format.as_deref() == Some("csv") {
        let rows = ExportService::grading_rows(&response.result);
        let csv = ExportService::export_to_csv(&rows)?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", GRADING_CSV_FILENAME),
                ),
            ],
            csv,
        )
            .into_response());
    }

    Ok(Json(response).into_response())
}
