use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::{
    handlers::{
        analyze_food_image::{__path_analyze_food_image, analyze_food_image},
        compare_dishes::{__path_compare_dishes, compare_dishes},
        get_analysis::{__path_get_analysis, get_analysis},
        get_analysis_history::{__path_get_analysis_history, get_analysis_history},
        get_nutrition::{__path_get_nutrition, get_nutrition},
    },
    validators::MAX_IMAGE_SIZE,
};
use crate::application::http::server::app_state::AppState;

/// Room for multipart boundaries and headers around the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(
    analyze_food_image,
    get_nutrition,
    compare_dishes,
    get_analysis_history,
    get_analysis
))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    let root_path = state.root_path();

    Router::new()
        .route(
            &format!("{}/analyze_food", root_path),
            post(analyze_food_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD)),
        )
        .route(
            &format!("{}/nutrition/{{dish_name}}", root_path),
            get(get_nutrition),
        )
        .route(&format!("{}/compare", root_path), get(compare_dishes))
        .route(&format!("{}/history", root_path), get(get_analysis_history))
        .route(
            &format!("{}/analysis/{{analysis_id}}", root_path),
            get(get_analysis),
        )
}
