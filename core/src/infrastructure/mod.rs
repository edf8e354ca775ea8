pub mod db;
pub mod food_analysis;
pub mod health;
pub mod llm;
