use utoipa::OpenApi;

use crate::application::http::{
    food_analysis::router::FoodAnalysisApiDoc, health::HealthApiDoc, root::RootApiDoc,
};

#[derive(OpenApi)]
#[openapi(info(
    title = "DishLens API",
    description = "Dish recognition, nutrition estimates and dish comparison backed by a vision model"
))]
pub struct ApiDoc;

/// Full document with every router's paths, prefixed with `root_path`.
pub fn api_doc(root_path: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(RootApiDoc::openapi());
    openapi.merge(FoodAnalysisApiDoc::openapi());
    openapi.merge(HealthApiDoc::openapi());

    openapi.paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| match path.as_str() {
            "/" if !root_path.is_empty() => (root_path.to_string(), item),
            _ => (format!("{root_path}{path}"), item),
        })
        .collect();

    openapi
}
