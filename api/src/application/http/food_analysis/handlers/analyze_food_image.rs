use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::header::{HeaderName, LOCATION},
};
use dishlens_core::domain::food_analysis::{
    entities::AnalysisRecord, ports::FoodAnalysisService, value_objects::AnalyzeFoodInput,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::application::http::{
    food_analysis::validators::{IMAGE_FIELD, validate_image_upload},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Receta {
    pub ingredientes: Vec<String>,
    pub pasos: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalyzeFoodResponse {
    pub nombre_plato: String,
    pub receta: Receta,
    pub datos_curiosos: Vec<String>,
}

impl From<AnalysisRecord> for AnalyzeFoodResponse {
    fn from(record: AnalysisRecord) -> Self {
        Self {
            nombre_plato: record.dish_name,
            receta: Receta {
                ingredientes: record.ingredients,
                pasos: record.steps,
            },
            datos_curiosos: record.trivia,
        }
    }
}

#[utoipa::path(
    post,
    path = "/analyze_food",
    tag = "food-analysis",
    summary = "Analyze a dish photo",
    description = "Identifies the dish in an uploaded JPEG, PNG or WebP image, stores the analysis and returns its name, recipe and fun facts. The Location header points at the stored record.",
    request_body(content_type = "multipart/form-data", description = "Multipart form with the image in the `file` field"),
    responses(
        (status = 200, body = AnalyzeFoodResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
        (status = 504, body = ApiErrorResponse),
    ),
)]
pub async fn analyze_food_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<([(HeaderName, String); 1], Response<AnalyzeFoodResponse>), ApiError> {
    let mut multipart = multipart?;
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        upload = Some((content_type, data.to_vec()));
        break;
    }

    let (content_type, image_data) = upload
        .ok_or_else(|| ApiError::BadRequest(format!("Missing {} field", IMAGE_FIELD)))?;

    let mime_type = validate_image_upload(content_type.as_deref(), &image_data)?;

    let outcome = state
        .service
        .analyze_food(AnalyzeFoodInput {
            image_data,
            mime_type: mime_type.as_str().to_string(),
        })
        .await
        .map_err(ApiError::from)?;

    info!(
        analysis_id = outcome.result.id,
        fallback = outcome.fallback,
        reasoning = %outcome.reasoning,
        "analyze_food completed"
    );

    let location = format!("{}/analysis/{}", state.root_path(), outcome.result.id);

    Ok((
        [(LOCATION, location)],
        Response::OK(AnalyzeFoodResponse::from(outcome.result)),
    ))
}
