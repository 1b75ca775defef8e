mod amortization;
mod engine;
mod types;

pub use engine::{MAX_PROJECTION_YEARS, monthly_ownership_cost, project};
pub use types::{InputError, Inputs, ProjectionResult, Winner, YearPoint};
