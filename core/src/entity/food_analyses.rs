use sea_orm::entity::prelude::*;

/// List columns hold JSON arrays of strings encoded as TEXT.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "food_analyses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub dish_name: String,
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    #[sea_orm(column_type = "Text")]
    pub recipe_steps: String,
    #[sea_orm(column_type = "Text")]
    pub fun_facts: String,
    pub image_hash: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
