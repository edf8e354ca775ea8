use axum::extract::{Path, State, rejection::PathRejection};
use dishlens_core::domain::food_analysis::{
    entities::NutritionEstimate, ports::FoodAnalysisService, value_objects::EstimateNutritionInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    food_analysis::validators::GetNutritionParams,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateQuery},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetNutritionResponse {
    pub dish_name: String,
    pub nutrition: NutritionEstimate,
    pub agent_reasoning: String,
}

#[utoipa::path(
    get,
    path = "/nutrition/{dish_name}",
    tag = "food-analysis",
    summary = "Estimate nutrition for a dish",
    description = "Estimates per-serving nutrition facts. When no ingredients are given the model infers the typical ones from the dish name.",
    params(
        ("dish_name" = String, Path, description = "Dish name"),
        GetNutritionParams
    ),
    responses(
        (status = 200, body = GetNutritionResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
        (status = 504, body = ApiErrorResponse),
    ),
)]
pub async fn get_nutrition(
    State(state): State<AppState>,
    dish_name: Result<Path<String>, PathRejection>,
    ValidateQuery(params): ValidateQuery<GetNutritionParams>,
) -> Result<Response<GetNutritionResponse>, ApiError> {
    let Path(dish_name) = dish_name?;

    let outcome = state
        .service
        .estimate_nutrition(EstimateNutritionInput {
            dish_name,
            ingredients: params.ingredient_list(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetNutritionResponse {
        dish_name: outcome.result.dish_name,
        nutrition: outcome.result.nutrition,
        agent_reasoning: outcome.reasoning,
    }))
}
