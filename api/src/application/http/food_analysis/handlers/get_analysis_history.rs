use axum::extract::State;
use dishlens_core::domain::food_analysis::{
    entities::AnalysisRecord, ports::FoodAnalysisService, value_objects::GetAnalysisHistoryInput,
};

use crate::application::http::{
    food_analysis::validators::GetAnalysisHistoryParams,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateQuery},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/history",
    tag = "food-analysis",
    summary = "List recent analyses",
    description = "Most recent first. `limit` defaults to 10 and accepts 1 to 100.",
    params(GetAnalysisHistoryParams),
    responses(
        (status = 200, body = Vec<AnalysisRecord>),
        (status = 400, body = ApiErrorResponse),
    ),
)]
pub async fn get_analysis_history(
    State(state): State<AppState>,
    ValidateQuery(params): ValidateQuery<GetAnalysisHistoryParams>,
) -> Result<Response<Vec<AnalysisRecord>>, ApiError> {
    let records = state
        .service
        .get_analysis_history(GetAnalysisHistoryInput {
            limit: params.limit,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(records))
}
