pub mod agent_outcome;
pub mod analysis_record;
pub mod dish_comparison;
pub mod nutrition_estimate;

pub use agent_outcome::*;
pub use analysis_record::*;
pub use dish_comparison::*;
pub use nutrition_estimate::*;
