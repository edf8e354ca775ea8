use axum::extract::{Path, State, rejection::PathRejection};
use dishlens_core::domain::food_analysis::{entities::AnalysisRecord, ports::FoodAnalysisService};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/analysis/{analysis_id}",
    tag = "food-analysis",
    summary = "Get one analysis",
    params(
        ("analysis_id" = i64, Path, description = "Analysis id"),
    ),
    responses(
        (status = 200, body = AnalysisRecord),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
    ),
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    analysis_id: Result<Path<i64>, PathRejection>,
) -> Result<Response<AnalysisRecord>, ApiError> {
    let Path(analysis_id) = analysis_id?;

    let record = state
        .service
        .get_analysis(analysis_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(record))
}
