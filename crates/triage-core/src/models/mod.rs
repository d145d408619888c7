pub mod decision;
pub mod model_spec;
pub mod outcome;
pub mod payload;
pub mod prediction;
