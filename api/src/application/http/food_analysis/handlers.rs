pub mod analyze_food_image;
pub mod compare_dishes;
pub mod get_analysis;
pub mod get_analysis_history;
pub mod get_nutrition;
