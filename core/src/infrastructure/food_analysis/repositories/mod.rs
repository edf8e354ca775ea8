pub mod food_analysis_repository;
