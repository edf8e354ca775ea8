use dishlens_core::domain::food_analysis::value_objects::ImageMimeType;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB
pub const IMAGE_FIELD: &str = "file";

/// Checks an uploaded file and returns the format sniffed from its bytes.
pub fn validate_image_upload(
    content_type: Option<&str>,
    data: &[u8],
) -> Result<ImageMimeType, ApiError> {
    if data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    if data.len() > MAX_IMAGE_SIZE {
        return Err(ApiError::BadRequest(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_SIZE
        )));
    }

    let declared = content_type.unwrap_or_default().trim().to_ascii_lowercase();
    if !declared.starts_with("image/") {
        return Err(ApiError::BadRequest(
            "Uploaded file must be an image".to_string(),
        ));
    }

    match image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => Ok(ImageMimeType::Jpeg),
        Ok(ImageFormat::Png) => Ok(ImageMimeType::Png),
        Ok(ImageFormat::WebP) => Ok(ImageMimeType::Webp),
        _ => Err(ApiError::BadRequest(
            "Unsupported image format, expected JPEG, PNG or WebP".to_string(),
        )),
    }
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct GetNutritionParams {
    /// Comma separated ingredient list
    #[schema(example = "carne, papa, arveja")]
    #[validate(length(max = 2000, message = "ingredients must be at most 2000 characters"))]
    pub ingredients: Option<String>,
}

impl GetNutritionParams {
    pub fn ingredient_list(&self) -> Option<Vec<String>> {
        self.ingredients
            .as_ref()
            .map(|raw| raw.split(',').map(|item| item.trim().to_string()).collect())
    }
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct CompareDishesParams {
    pub analysis_id1: i64,
    pub analysis_id2: i64,
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct GetAnalysisHistoryParams {
    #[schema(example = 10)]
    /// Values above 100 are clamped to 100
    #[validate(range(min = 1, message = "limit must be a positive integer"))]
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";

    #[test]
    fn test_sniffed_format_wins_over_declared_type() {
        assert_eq!(
            validate_image_upload(Some("image/jpeg"), PNG).unwrap(),
            ImageMimeType::Png
        );
        assert_eq!(
            validate_image_upload(Some("image/png"), JPEG).unwrap(),
            ImageMimeType::Jpeg
        );
    }

    #[test]
    fn test_rejects_empty_non_image_and_unknown_bytes() {
        assert!(validate_image_upload(Some("image/png"), b"").is_err());
        assert!(validate_image_upload(Some("text/plain"), PNG).is_err());
        assert!(validate_image_upload(None, PNG).is_err());
        assert!(validate_image_upload(Some("image/png"), b"definitely not an image").is_err());
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let mut data = PNG.to_vec();
        data.resize(MAX_IMAGE_SIZE + 1, 0);
        assert_eq!(
            validate_image_upload(Some("image/png"), &data),
            Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )))
        );
    }

    #[test]
    fn test_history_limit_range() {
        assert!(GetAnalysisHistoryParams { limit: Some(10) }.validate().is_ok());
        assert!(GetAnalysisHistoryParams { limit: None }.validate().is_ok());
        assert!(GetAnalysisHistoryParams { limit: Some(0) }.validate().is_err());
        assert!(GetAnalysisHistoryParams { limit: Some(500) }.validate().is_ok());
    }

    #[test]
    fn test_ingredient_list_splits_on_commas() {
        let params = GetNutritionParams {
            ingredients: Some("carne, papa ,".to_string()),
        };
        assert_eq!(
            params.ingredient_list(),
            Some(vec!["carne".to_string(), "papa".to_string(), String::new()])
        );
    }
}
