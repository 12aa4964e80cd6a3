// Planning module
pub mod plan;

pub use plan::{PlanArgs, plan};
