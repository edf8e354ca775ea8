use std::collections::BTreeMap;

use axum::{Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

const ENDPOINTS: &[(&str, &str)] = &[
    ("/analyze_food", "POST a dish photo as multipart field `file`"),
    ("/nutrition/{dish_name}", "GET nutrition estimate, optional ?ingredients=a,b"),
    ("/compare", "GET comparison of ?analysis_id1=X&analysis_id2=Y"),
    ("/history", "GET recent analyses, optional ?limit=N"),
    ("/analysis/{analysis_id}", "GET one stored analysis"),
    ("/health", "GET liveness and database latency"),
    ("/metrics", "GET Prometheus metrics"),
    ("/scalar", "API reference"),
];

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IndexResponse {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

#[derive(OpenApi)]
#[openapi(paths(index))]
pub struct RootApiDoc;

#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    summary = "Service description and endpoint list",
    responses((status = 200, body = IndexResponse)),
)]
pub async fn index(State(state): State<AppState>) -> Response<IndexResponse> {
    let root_path = state.root_path();
    let endpoints = ENDPOINTS
        .iter()
        .map(|(path, description)| (format!("{root_path}{path}"), description.to_string()))
        .collect();

    Response::OK(IndexResponse {
        message: "DishLens food analysis API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

pub fn root_routes(root_path: &str) -> Router<AppState> {
    let path = if root_path.is_empty() { "/" } else { root_path };
    Router::new().route(path, get(index))
}
