use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food_analysis::entities::{AnalysisRecord, DishComparison, NutritionEstimate};

pub const DEFAULT_HISTORY_LIMIT: u64 = 10;
pub const MAX_HISTORY_LIMIT: u64 = 100;

/// Image formats the vision model accepts inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Webp,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Webp => "image/webp",
        }
    }

    /// Parses a `Content-Type` value, ignoring parameters and case.
    pub fn parse(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageMimeType::Jpeg),
            "image/png" => Some(ImageMimeType::Png),
            "image/webp" => Some(ImageMimeType::Webp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeFoodInput {
    pub image_data: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Clone)]
pub struct EstimateNutritionInput {
    pub dish_name: String,
    pub ingredients: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy)]
pub struct CompareDishesInput {
    pub first_id: i64,
    pub second_id: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetAnalysisHistoryInput {
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionReport {
    pub dish_name: String,
    pub nutrition: NutritionEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComparisonReport {
    pub dish1: AnalysisRecord,
    pub dish2: AnalysisRecord,
    pub comparison: DishComparison,
}
