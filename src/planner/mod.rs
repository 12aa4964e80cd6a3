pub mod client;

pub use client::{PLANNER_PROMPT, Planner, PlannerClient, PlannerError};

#[cfg(any(test, feature = "test-support"))]
pub use client::MockPlanner;
