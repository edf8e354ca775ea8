use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, DatabaseConnection, EntityTrait,
    QueryOrder, QuerySelect,
};
use tracing::error;

use crate::{
    domain::{
        common::{entities::app_errors::CoreError, generate_timestamp},
        food_analysis::{
            entities::{AnalysisRecord, NewAnalysisRecord},
            ports::FoodAnalysisRepository,
        },
    },
    entity::food_analyses::{ActiveModel, Column, Entity},
    infrastructure::food_analysis::mappers::encode_list,
};

#[derive(Debug, Clone)]
pub struct SqliteFoodAnalysisRepository {
    pub db: DatabaseConnection,
}

impl SqliteFoodAnalysisRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn storage_error(action: &str, e: impl std::fmt::Display) -> CoreError {
    error!("Failed to {}: {}", action, e);
    CoreError::StorageError(format!("failed to {action}"))
}

impl FoodAnalysisRepository for SqliteFoodAnalysisRepository {
    async fn create_analysis(&self, record: NewAnalysisRecord) -> Result<AnalysisRecord, CoreError> {
        let encode = |items: &[String]| {
            encode_list(items).map_err(|e| storage_error("encode analysis list", e))
        };

        let created = ActiveModel {
            id: NotSet,
            dish_name: Set(record.dish_name),
            ingredients: Set(encode(&record.ingredients)?),
            recipe_steps: Set(encode(&record.steps)?),
            fun_facts: Set(encode(&record.trivia)?),
            image_hash: Set(record.image_hash),
            created_at: Set(generate_timestamp()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| storage_error("create food analysis", e))?;

        Ok(AnalysisRecord::from(created))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<AnalysisRecord>, CoreError> {
        let analysis = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| storage_error("get food analysis", e))?
            .map(AnalysisRecord::from);

        Ok(analysis)
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<AnalysisRecord>, CoreError> {
        let analyses = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("list food analyses", e))?
            .into_iter()
            .map(AnalysisRecord::from)
            .collect();

        Ok(analyses)
    }
}
