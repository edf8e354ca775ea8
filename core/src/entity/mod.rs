pub mod food_analyses;
