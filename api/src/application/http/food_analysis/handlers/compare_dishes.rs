use axum::extract::State;
use dishlens_core::domain::food_analysis::{
    entities::{AnalysisRecord, DishComparison},
    ports::FoodAnalysisService,
    value_objects::CompareDishesInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    food_analysis::validators::CompareDishesParams,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateQuery},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CompareDishesResponse {
    pub dish1: AnalysisRecord,
    pub dish2: AnalysisRecord,
    pub comparison: DishComparison,
    pub agent_reasoning: String,
}

#[utoipa::path(
    get,
    path = "/compare",
    tag = "food-analysis",
    summary = "Compare two analyzed dishes",
    params(CompareDishesParams),
    responses(
        (status = 200, body = CompareDishesResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
        (status = 504, body = ApiErrorResponse),
    ),
)]
pub async fn compare_dishes(
    State(state): State<AppState>,
    ValidateQuery(params): ValidateQuery<CompareDishesParams>,
) -> Result<Response<CompareDishesResponse>, ApiError> {
    let outcome = state
        .service
        .compare_dishes(CompareDishesInput {
            first_id: params.analysis_id1,
            second_id: params.analysis_id2,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(CompareDishesResponse {
        dish1: outcome.result.dish1,
        dish2: outcome.result.dish2,
        comparison: outcome.result.comparison,
        agent_reasoning: outcome.reasoning,
    }))
}
